use crate::DVec3;

/// Distance a spawned ray's origin is pushed along its direction so it does
/// not re-hit the surface it left.
pub const RAY_OFFSET_EPSILON: f64 = 1e-6;

/// Refractive index of vacuum / air.
pub const DEFAULT_REFRACTIVE_INDEX: f64 = 1.0;

/// A ray in 3D space with origin, direction, and the refractive index of
/// the medium it currently travels through.
///
/// The direction is expected to be unit length; intersection code relies
/// on it for distances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: DVec3,
    direction: DVec3,
    refractive_index: f64,
}

impl Ray {
    /// Create a new ray travelling through air.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self::with_refractive_index(origin, direction, DEFAULT_REFRACTIVE_INDEX)
    }

    /// Create a new ray travelling through a medium of the given index.
    pub fn with_refractive_index(origin: DVec3, direction: DVec3, refractive_index: f64) -> Self {
        Self {
            origin,
            direction,
            refractive_index,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    /// Refractive index of the medium the ray is in.
    #[inline]
    pub fn refractive_index(&self) -> f64 {
        self.refractive_index
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Mirror this ray about `normal` at `point`.
    ///
    /// The reflected direction is `d - 2(d·n)n`; the refractive index is
    /// carried over unchanged.
    pub fn reflect(&self, point: DVec3, normal: DVec3) -> Ray {
        let direction = self.direction - 2.0 * self.direction.dot(normal) * normal;
        Ray::with_refractive_index(point, direction, self.refractive_index)
    }

    /// Copy of this ray with its origin advanced by [`RAY_OFFSET_EPSILON`].
    #[must_use]
    pub fn with_offset(&self) -> Ray {
        Ray {
            origin: self.origin + self.direction * RAY_OFFSET_EPSILON,
            ..*self
        }
    }
}
