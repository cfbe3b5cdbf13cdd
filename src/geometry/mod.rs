mod centerline;

pub use centerline::Centerline;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2, TOLERANCE};

/// Arc-length queries over a planar curve in a linear-unit coordinate system.
///
/// This is the only view of the road geometry the sampling engine needs.
pub trait LinearReference {
    /// Total arc length of the curve.
    fn length(&self) -> f64;

    /// Returns the point at `distance` along the curve.
    ///
    /// Distances outside `[0, length]` are clamped to the nearest endpoint.
    fn interpolate(&self, distance: f64) -> Point2;

    /// Computes the unit tangent at `distance` by finite difference.
    ///
    /// Uses a forward difference over `epsilon`. When `distance + epsilon`
    /// reaches the end of the curve, a backward difference is used instead so
    /// the terminal point still gets the direction of the last segment. If
    /// the chosen difference is degenerate (e.g. a hairpin folds the probe
    /// back onto the base point), the opposite direction is tried.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if both differences are degenerate.
    fn tangent_at(&self, distance: f64, epsilon: f64) -> Result<Vector2> {
        let forward = || {
            unit_difference(self.interpolate(distance), self.interpolate(distance + epsilon))
        };
        let backward = || {
            unit_difference(self.interpolate(distance - epsilon), self.interpolate(distance))
        };

        let tangent = if distance + epsilon >= self.length() {
            backward().or_else(forward)
        } else {
            forward().or_else(backward)
        };
        tangent.ok_or_else(|| GeometryError::ZeroVector { distance }.into())
    }
}

/// Unit vector from `a` to `b`, or `None` if the points coincide.
fn unit_difference(a: Point2, b: Point2) -> Option<Vector2> {
    let d = b - a;
    let mag = d.norm();
    if !mag.is_finite() || mag < TOLERANCE {
        return None;
    }
    Some(d / mag)
}
