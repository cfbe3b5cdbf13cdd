/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns the left-pointing normal of a direction vector
/// (90° counter-clockwise rotation).
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_normal_rotates_ccw() {
        let n = left_normal(Vector2::new(1.0, 0.0));
        assert!((n.x).abs() < TOLERANCE);
        assert!((n.y - 1.0).abs() < TOLERANCE);

        let n = left_normal(Vector2::new(0.0, 1.0));
        assert!((n.x + 1.0).abs() < TOLERANCE);
        assert!((n.y).abs() < TOLERANCE);
    }
}
