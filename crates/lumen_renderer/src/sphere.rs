//! Sphere primitive for ray tracing.

use crate::{
    intersectable::Intersectable,
    intersection::{Intersection, IntersectionBuilder},
    Color, Ray,
};
use lumen_math::{DVec3, DEFAULT_REFRACTIVE_INDEX};
use thiserror::Error;

const DEFAULT_COLOR: Color = Color::ONE;

/// Errors that can occur while building a sphere.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SphereBuildError {
    #[error("sphere center was not set")]
    MissingCenter,

    #[error("sphere radius was not set")]
    MissingRadius,

    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f64),
}

/// A sphere primitive with one of three materials: diffuse, mirror or
/// transparent dielectric. A mirror flag wins over a transparent flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
    color: Color,
    mirror: bool,
    transparent: bool,
    refractive_index: f64,
}

impl Sphere {
    /// Start building a sphere.
    pub fn builder() -> SphereBuilder {
        SphereBuilder::new()
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_mirror(&self) -> bool {
        self.mirror
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn refractive_index(&self) -> f64 {
        self.refractive_index
    }

    /// Outward unit normal at a point on the surface.
    #[inline]
    pub fn normal(&self, point: DVec3) -> DVec3 {
        (point - self.center).normalize()
    }

    /// Classify a dielectric hit into refraction or total internal
    /// reflection.
    fn refract(
        &self,
        ray: &Ray,
        point: DVec3,
        outward_normal: DVec3,
        builder: &mut IntersectionBuilder,
    ) {
        let direction = ray.direction();

        // Exiting when travelling along the outward normal.
        // TODO: nested dielectrics would need the enclosing medium's index instead of air.
        let exiting = outward_normal.dot(direction) > 0.0;
        let (normal, n2) = if exiting {
            (-outward_normal, DEFAULT_REFRACTIVE_INDEX)
        } else {
            (outward_normal, self.refractive_index)
        };
        let n1 = ray.refractive_index();
        let n = n1 / n2;

        // normal faces the incident side, so cos_i <= 0
        let cos_i = direction.dot(normal);
        let sin2_t = n * n * (1.0 - cos_i * cos_i);

        let reflected_ray = ray.reflect(point, normal).with_offset();

        if sin2_t > 1.0 {
            builder.with_reflected_ray(reflected_ray);
            return;
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let tangent = (direction - normal * cos_i) * n;
        // transmission side is opposite the incident-facing normal
        let refracted_direction = (tangent - normal * cos_t).normalize();
        let refracted_ray = Ray::with_refractive_index(point, refracted_direction, n2).with_offset();

        builder.with_refraction(refracted_ray, reflected_ray);
    }
}

impl Intersectable for Sphere {
    fn intersect(&self, ray: &Ray) -> Intersection {
        let oc = ray.origin() - self.center;
        let b = ray.direction().dot(oc);
        let discriminant = b * b - oc.length_squared() + self.radius * self.radius;

        if discriminant < 0.0 {
            return Intersection::MISS;
        }

        let sqrtd = discriminant.sqrt();
        let t1 = -b - sqrtd;
        let t2 = -b + sqrtd;

        // Sphere is entirely behind the ray
        if t2 < 0.0 {
            return Intersection::MISS;
        }

        // Nearer positive root; the far one when the origin is inside
        let distance = if t1 >= 0.0 { t1 } else { t2 };
        let point = ray.at(distance);
        let normal = self.normal(point);

        let mut builder = IntersectionBuilder::new();
        builder
            .with_hit(true)
            .with_point(point)
            .with_normal(normal)
            .with_distance(distance)
            .with_source_ray(*ray);

        if self.mirror {
            builder.with_reflected_ray(ray.reflect(point, normal).with_offset());
        } else if self.transparent {
            self.refract(ray, point, normal, &mut builder);
        } else {
            builder.with_albedo(self.color);
        }

        builder.build()
    }
}

/// Builder for [`Sphere`]. Center and radius are required.
#[derive(Debug, Clone)]
pub struct SphereBuilder {
    center: Option<DVec3>,
    radius: Option<f64>,
    color: Color,
    mirror: bool,
    transparent: bool,
    refractive_index: f64,
}

impl SphereBuilder {
    pub fn new() -> Self {
        Self {
            center: None,
            radius: None,
            color: DEFAULT_COLOR,
            mirror: false,
            transparent: false,
            refractive_index: DEFAULT_REFRACTIVE_INDEX,
        }
    }

    pub fn center(mut self, center: DVec3) -> Self {
        self.center = Some(center);
        self
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Diffuse base color.
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Set the index of refraction; also marks the sphere transparent.
    pub fn refractive_index(mut self, refractive_index: f64) -> Self {
        self.transparent = true;
        self.refractive_index = refractive_index;
        self
    }

    pub fn build(self) -> Result<Sphere, SphereBuildError> {
        let center = self.center.ok_or(SphereBuildError::MissingCenter)?;
        let radius = self.radius.ok_or(SphereBuildError::MissingRadius)?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SphereBuildError::InvalidRadius(radius));
        }

        Ok(Sphere {
            center,
            radius,
            color: self.color,
            mirror: self.mirror,
            transparent: self.transparent,
            refractive_index: self.refractive_index,
        })
    }
}

impl Default for SphereBuilder {
    fn default() -> Self {
        Self::new()
    }
}
