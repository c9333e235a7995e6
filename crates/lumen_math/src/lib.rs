// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod ray;
pub use ray::{Ray, DEFAULT_REFRACTIVE_INDEX, RAY_OFFSET_EPSILON};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec3_creation() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_dvec3_operations() {
        let a = DVec3::new(1.0, 2.0, 3.0);
        let b = DVec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, DVec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, DVec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(a * b, DVec3::new(4.0, 10.0, 18.0)); // component-wise
        assert_eq!(b / 2.0, DVec3::new(2.0, 2.5, 3.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(DVec3::X.cross(DVec3::Y), DVec3::Z);
    }

    #[test]
    fn test_dvec3_norms() {
        let v = DVec3::new(3.0, 4.0, 0.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(v.length(), 5.0);

        let n = v.normalize();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!((n - DVec3::new(0.6, 0.8, 0.0)).length() < 1e-12);
    }
}
