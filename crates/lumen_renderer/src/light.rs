//! Point light source.

use crate::Color;
use lumen_math::DVec3;
use std::f64::consts::PI;

/// An isotropic point emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    position: DVec3,
    /// Radiant power, spread evenly over the sphere of directions.
    intensity: f64,
}

impl PointLight {
    pub fn new(position: DVec3, intensity: f64) -> Self {
        Self {
            position,
            intensity,
        }
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Lambertian radiance leaving `point` toward the viewer, assuming the
    /// light is unoccluded.
    ///
    /// `albedo * I / (4π d²) * max(0, n·L) / π`
    pub fn lambertian_shading(&self, point: DVec3, normal: DVec3, albedo: Color) -> Color {
        let to_light = self.position - point;
        let d2 = to_light.length_squared();
        if !(d2 > 0.0 && d2.is_finite()) {
            return Color::ZERO;
        }
        let irradiance = self.intensity / (4.0 * PI * d2);
        let cos_theta = normal.dot(to_light.normalize()).max(0.0);

        albedo * irradiance * cos_theta / PI
    }
}
