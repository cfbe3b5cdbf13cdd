use crate::error::{GeometryError, Result};
use crate::math::{Point2, TOLERANCE};

use super::LinearReference;

/// An open planar polyline parameterized by arc length.
///
/// Cumulative lengths are precomputed so interpolation is a binary search
/// followed by a lerp inside one segment.
#[derive(Debug, Clone)]
pub struct Centerline {
    vertices: Vec<Point2>,
    cumulative: Vec<f64>,
}

impl Centerline {
    /// Creates a centerline from its ordered vertices.
    ///
    /// Repeated consecutive vertices are accepted; they form zero-length
    /// segments that interpolation steps over.
    ///
    /// # Errors
    ///
    /// - `GeometryError::TooFewVertices` if fewer than 2 vertices are given
    /// - `GeometryError::NonFinite` if any coordinate is NaN or infinite
    /// - `GeometryError::ZeroLength` if the total length is not positive
    pub fn new(vertices: Vec<Point2>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(GeometryError::TooFewVertices(vertices.len()).into());
        }
        if let Some(index) = vertices
            .iter()
            .position(|v| !v.x.is_finite() || !v.y.is_finite())
        {
            return Err(GeometryError::NonFinite { index }.into());
        }

        let mut cumulative = Vec::with_capacity(vertices.len());
        let mut total = 0.0;
        cumulative.push(total);
        for pair in vertices.windows(2) {
            total += (pair[1] - pair[0]).norm();
            cumulative.push(total);
        }

        if total <= TOLERANCE {
            return Err(GeometryError::ZeroLength.into());
        }

        Ok(Self {
            vertices,
            cumulative,
        })
    }

    /// Creates a centerline from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`Centerline::new`].
    pub fn from_xy(coords: &[(f64, f64)]) -> Result<Self> {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    /// Returns the vertices of the polyline.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }
}

impl LinearReference for Centerline {
    fn length(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    fn interpolate(&self, distance: f64) -> Point2 {
        let total = self.length();
        if distance.is_nan() || distance <= 0.0 {
            return self.vertices[0];
        }
        if distance >= total {
            return self.vertices[self.vertices.len() - 1];
        }

        // First vertex strictly beyond `distance`; the segment ends there.
        let end = self.cumulative.partition_point(|&c| c <= distance);
        let start = end - 1;
        let seg_len = self.cumulative[end] - self.cumulative[start];
        if seg_len <= 0.0 {
            return self.vertices[start];
        }
        let t = (distance - self.cumulative[start]) / seg_len;
        self.vertices[start] + (self.vertices[end] - self.vertices[start]) * t
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SamplingError;
    use approx::assert_abs_diff_eq;

    fn l_shape() -> Centerline {
        Centerline::from_xy(&[(0.0, 0.0), (500.0, 0.0), (500.0, 500.0)]).unwrap()
    }

    #[test]
    fn length_sums_segments() {
        assert_abs_diff_eq!(l_shape().length(), 1000.0, epsilon = 1e-9);

        let diag = Centerline::from_xy(&[(0.0, 0.0), (3.0, 4.0)]).unwrap();
        assert_abs_diff_eq!(diag.length(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn interpolate_walks_both_segments() {
        let line = l_shape();
        let p = line.interpolate(250.0);
        assert_abs_diff_eq!(p.x, 250.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-9);

        let corner = line.interpolate(500.0);
        assert_abs_diff_eq!(corner.x, 500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(corner.y, 0.0, epsilon = 1e-9);

        let p = line.interpolate(750.0);
        assert_abs_diff_eq!(p.x, 500.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 250.0, epsilon = 1e-9);
    }

    #[test]
    fn interpolate_clamps_out_of_range() {
        let line = l_shape();
        assert_eq!(line.interpolate(-5.0), Point2::new(0.0, 0.0));
        assert_eq!(line.interpolate(1e6), Point2::new(500.0, 500.0));
    }

    #[test]
    fn interpolate_skips_repeated_vertices() {
        let line =
            Centerline::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 10.0)]).unwrap();
        assert_abs_diff_eq!(line.length(), 20.0, epsilon = 1e-12);
        let p = line.interpolate(15.0);
        assert_abs_diff_eq!(p.x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_single_vertex() {
        let err = Centerline::from_xy(&[(1.0, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            SamplingError::Geometry(GeometryError::TooFewVertices(1))
        ));
    }

    #[test]
    fn rejects_zero_length() {
        let err = Centerline::from_xy(&[(1.0, 1.0), (1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, SamplingError::Geometry(GeometryError::ZeroLength)));
    }

    #[test]
    fn rejects_nan_vertex() {
        let err = Centerline::from_xy(&[(0.0, 0.0), (f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            SamplingError::Geometry(GeometryError::NonFinite { index: 1 })
        ));
    }

    #[test]
    fn tangent_forward_difference() {
        let line = l_shape();
        let t = line.tangent_at(100.0, 0.5).unwrap();
        assert_abs_diff_eq!(t.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.y, 0.0, epsilon = 1e-12);

        let t = line.tangent_at(700.0, 0.5).unwrap();
        assert_abs_diff_eq!(t.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn tangent_falls_back_to_backward_difference_at_end() {
        let line = l_shape();
        for d in [999.6, 999.9, 1000.0] {
            let t = line.tangent_at(d, 0.5).unwrap();
            assert_abs_diff_eq!(t.x, 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(t.y, 1.0, epsilon = 1e-9);
            assert!(t.x.is_finite() && t.y.is_finite());
        }
    }

    #[test]
    fn tangent_at_start_uses_first_segment() {
        let t = l_shape().tangent_at(0.0, 0.5).unwrap();
        assert_abs_diff_eq!(t.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(t.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn tangent_retries_backward_when_hairpin_folds_forward_difference() {
        // Hairpin vertex at 100 is epsilon/2 ahead: 99.75 and 100.25 coincide.
        let line = Centerline::from_xy(&[(0.0, 0.0), (100.0, 0.0), (0.0, 0.0)]).unwrap();
        let t = line.tangent_at(99.75, 0.5).unwrap();
        assert_abs_diff_eq!(t.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn tangent_with_zero_epsilon_is_degenerate() {
        let err = l_shape().tangent_at(100.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            SamplingError::Geometry(GeometryError::ZeroVector { .. })
        ));
    }
}
