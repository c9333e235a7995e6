//! Intersection record and its builder.
//!
//! An [`Intersection`] describes the outcome of testing one ray against a
//! surface or a whole scene. `hit` and `distance` are always defined; every
//! other field is optional and reading one that was never set is a contract
//! violation reported as [`IntersectionError::UnsetField`].

use crate::{Color, Ray};
use lumen_math::DVec3;
use thiserror::Error;

/// Errors raised when reading an [`Intersection`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionError {
    #[error("intersection field `{0}` was never set")]
    UnsetField(&'static str),
}

pub type IntersectionResult<T> = Result<T, IntersectionError>;

/// How light leaves the surface at an intersection.
///
/// A surface classifies each hit into exactly one of these modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transport {
    /// Lambertian diffuse surface with the given reflectance.
    Opaque { albedo: Color },
    /// Perfect mirror, or a dielectric under total internal reflection.
    Reflected { reflected_ray: Ray },
    /// Dielectric boundary; both branches are kept for Fresnel mixing.
    Refracted { refracted_ray: Ray, reflected_ray: Ray },
}

/// Immutable result of a ray/surface test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    hit: bool,
    distance: f64,
    point: Option<DVec3>,
    normal: Option<DVec3>,
    source_ray: Option<Ray>,
    transport: Option<Transport>,
}

impl Intersection {
    /// The non-hit sentinel. Its infinite distance loses every
    /// nearest-hit comparison.
    pub const MISS: Intersection = Intersection {
        hit: false,
        distance: f64::INFINITY,
        point: None,
        normal: None,
        source_ray: None,
        transport: None,
    };

    /// Start building an intersection.
    pub fn builder() -> IntersectionBuilder {
        IntersectionBuilder::new()
    }

    /// Whether any surface was struck.
    #[inline]
    pub fn hit(&self) -> bool {
        self.hit
    }

    /// Parametric distance along the source ray, `+inf` for a miss.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// World-space hit location.
    pub fn point(&self) -> IntersectionResult<DVec3> {
        self.point.ok_or(IntersectionError::UnsetField("point"))
    }

    /// Outward unit normal at the hit location.
    pub fn normal(&self) -> IntersectionResult<DVec3> {
        self.normal.ok_or(IntersectionError::UnsetField("normal"))
    }

    /// The incoming ray that produced this intersection.
    pub fn source_ray(&self) -> IntersectionResult<Ray> {
        self.source_ray.ok_or(IntersectionError::UnsetField("source_ray"))
    }

    /// Outgoing transport classification, if any.
    pub fn transport(&self) -> Option<&Transport> {
        self.transport.as_ref()
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self.transport, Some(Transport::Opaque { .. }))
    }

    pub fn is_reflected(&self) -> bool {
        matches!(self.transport, Some(Transport::Reflected { .. }))
    }

    pub fn is_refracted(&self) -> bool {
        matches!(self.transport, Some(Transport::Refracted { .. }))
    }

    /// Diffuse reflectance; only set on opaque hits.
    pub fn albedo(&self) -> IntersectionResult<Color> {
        match self.transport {
            Some(Transport::Opaque { albedo }) => Ok(albedo),
            _ => Err(IntersectionError::UnsetField("albedo")),
        }
    }

    /// Mirror ray; set on reflected and refracted hits.
    pub fn reflected_ray(&self) -> IntersectionResult<Ray> {
        match self.transport {
            Some(Transport::Reflected { reflected_ray })
            | Some(Transport::Refracted { reflected_ray, .. }) => Ok(reflected_ray),
            _ => Err(IntersectionError::UnsetField("reflected_ray")),
        }
    }

    /// Transmitted ray; only set on refracted hits.
    pub fn refracted_ray(&self) -> IntersectionResult<Ray> {
        match self.transport {
            Some(Transport::Refracted { refracted_ray, .. }) => Ok(refracted_ray),
            _ => Err(IntersectionError::UnsetField("refracted_ray")),
        }
    }
}

impl Default for Intersection {
    fn default() -> Self {
        Self::MISS
    }
}

/// Mutable staging area for an [`Intersection`].
///
/// Fields that are never configured stay unset in the built record. The
/// transport setters replace each other, so the last one called wins.
#[derive(Debug, Clone, Copy)]
pub struct IntersectionBuilder {
    intersection: Intersection,
}

impl IntersectionBuilder {
    pub fn new() -> Self {
        Self {
            intersection: Intersection::MISS,
        }
    }

    pub fn with_hit(&mut self, hit: bool) -> &mut Self {
        self.intersection.hit = hit;
        self
    }

    pub fn with_distance(&mut self, distance: f64) -> &mut Self {
        self.intersection.distance = distance;
        self
    }

    pub fn with_point(&mut self, point: DVec3) -> &mut Self {
        self.intersection.point = Some(point);
        self
    }

    pub fn with_normal(&mut self, normal: DVec3) -> &mut Self {
        self.intersection.normal = Some(normal);
        self
    }

    pub fn with_source_ray(&mut self, ray: Ray) -> &mut Self {
        self.intersection.source_ray = Some(ray);
        self
    }

    /// Classify as a diffuse hit.
    pub fn with_albedo(&mut self, albedo: Color) -> &mut Self {
        self.intersection.transport = Some(Transport::Opaque { albedo });
        self
    }

    /// Classify as a mirror hit.
    pub fn with_reflected_ray(&mut self, reflected_ray: Ray) -> &mut Self {
        self.intersection.transport = Some(Transport::Reflected { reflected_ray });
        self
    }

    /// Classify as a dielectric hit carrying both outgoing branches.
    pub fn with_refraction(&mut self, refracted_ray: Ray, reflected_ray: Ray) -> &mut Self {
        self.intersection.transport = Some(Transport::Refracted {
            refracted_ray,
            reflected_ray,
        });
        self
    }

    pub fn build(&self) -> Intersection {
        self.intersection
    }
}

impl Default for IntersectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
