//! Scene and light-transport engine.
//!
//! The scene borrows its surfaces and lights and, once assembled, is only
//! read during rendering, so one scene can be shared by every render worker.
//!
//! Radiance is evaluated recursively:
//! - diffuse hits add direct light from every visible light source and,
//!   optionally, one Monte Carlo bounce of indirect light;
//! - mirror hits follow the reflected ray;
//! - dielectric hits follow the refracted ray, or stochastically split
//!   between reflection and refraction by the Fresnel reflectance.
//!
//! Top-level evaluations integrate with the configured sample counts; every
//! evaluation nested under a sampled one uses a single sample.

use crate::{
    config::{FresnelModel, TraceConfig},
    intersectable::{self, Intersectable},
    intersection::{Intersection, IntersectionResult, Transport},
    light::PointLight,
    sampling::{gen_f64, hemisphere_ray},
    Color, Ray,
};
use lumen_math::DVec3;
use rand::RngCore;

/// Which side of a dielectric boundary a Fresnel sample follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FresnelBranch {
    Reflected,
    Refracted,
}

impl FresnelBranch {
    /// Pick the reflected branch with probability `reflectance`.
    pub fn choose(reflectance: f64, rng: &mut dyn RngCore) -> Self {
        if gen_f64(rng) < reflectance {
            FresnelBranch::Reflected
        } else {
            FresnelBranch::Refracted
        }
    }
}

/// Reflectance at a dielectric boundary.
///
/// `n1` and `n2` are the indices on the incident and transmission sides and
/// `cos_i` the cosine between the incident direction and the normal.
pub fn reflection_coefficient(model: FresnelModel, n1: f64, n2: f64, cos_i: f64) -> f64 {
    let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
    match model {
        FresnelModel::Normal => r0,
        FresnelModel::Schlick => r0 + (1.0 - r0) * (1.0 - cos_i.abs()).powi(5),
    }
}

/// A collection of surfaces and point lights plus the transport settings.
pub struct Scene<'a> {
    surfaces: Vec<&'a dyn Intersectable>,
    lights: Vec<&'a PointLight>,
    config: TraceConfig,
}

impl<'a> Scene<'a> {
    /// Create an empty scene with default transport settings.
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default())
    }

    /// Create an empty scene with the given transport settings.
    pub fn with_config(config: TraceConfig) -> Self {
        Self {
            surfaces: Vec::new(),
            lights: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn add_surface(&mut self, surface: &'a dyn Intersectable) -> &mut Self {
        self.surfaces.push(surface);
        self
    }

    pub fn add_light(&mut self, light: &'a PointLight) -> &mut Self {
        self.lights.push(light);
        self
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Nearest intersection of `ray` with any surface, or the miss sentinel.
    ///
    /// Linear scan; scenes are expected to hold a handful of spheres.
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        intersectable::nearest(self.surfaces.iter().copied(), ray)
    }

    /// Whether `light` is visible from `point`.
    ///
    /// Binary test: the light is occluded when any surface is hit strictly
    /// closer than the light itself. A light sitting on the point has no
    /// direction to it and counts as not reaching.
    pub fn reaches_light(&self, light: &PointLight, point: DVec3) -> bool {
        let to_light = light.position() - point;
        let distance = to_light.length();
        if !(distance > 0.0 && distance.is_finite()) {
            return false;
        }
        let ray = Ray::new(point, to_light / distance).with_offset();

        let occluder = self.intersect(&ray);
        !(occluder.hit() && occluder.distance() < distance)
    }

    /// Radiance leaving `intersection` toward the ray that produced it.
    ///
    /// With `top_level_sampling` the indirect and Fresnel estimators use the
    /// configured sample counts; otherwise they draw a single sample, which
    /// suits callers that already average many camera rays per pixel.
    pub fn color_of(
        &self,
        intersection: &Intersection,
        top_level_sampling: bool,
        rng: &mut dyn RngCore,
    ) -> IntersectionResult<Color> {
        if self.lights.is_empty() {
            return Ok(Color::ZERO);
        }
        self.color_recursive(intersection, 1, !top_level_sampling, rng)
    }

    fn color_recursive(
        &self,
        intersection: &Intersection,
        depth: u32,
        is_sub_sample: bool,
        rng: &mut dyn RngCore,
    ) -> IntersectionResult<Color> {
        if depth > self.config.max_depth || !intersection.hit() {
            return Ok(Color::ZERO);
        }

        match intersection.transport() {
            Some(Transport::Opaque { albedo }) => {
                self.opaque_color(intersection, *albedo, depth, is_sub_sample, rng)
            }
            Some(Transport::Reflected { reflected_ray }) => {
                self.trace(reflected_ray, depth + 1, is_sub_sample, rng)
            }
            Some(Transport::Refracted {
                refracted_ray,
                reflected_ray,
            }) => self.dielectric_color(
                intersection,
                refracted_ray,
                reflected_ray,
                depth,
                is_sub_sample,
                rng,
            ),
            None => Ok(Color::ZERO),
        }
    }

    /// Intersect `ray` and evaluate the radiance coming back along it.
    fn trace(
        &self,
        ray: &Ray,
        depth: u32,
        is_sub_sample: bool,
        rng: &mut dyn RngCore,
    ) -> IntersectionResult<Color> {
        let intersection = self.intersect(ray);
        self.color_recursive(&intersection, depth, is_sub_sample, rng)
    }

    fn sample_count(&self, top_level: u32, is_sub_sample: bool) -> u32 {
        if is_sub_sample {
            1
        } else {
            top_level.max(1)
        }
    }

    fn opaque_color(
        &self,
        intersection: &Intersection,
        albedo: Color,
        depth: u32,
        is_sub_sample: bool,
        rng: &mut dyn RngCore,
    ) -> IntersectionResult<Color> {
        let direct = self.direct_lighting(intersection, albedo)?;
        if !self.config.enable_indirect_lighting {
            return Ok(direct);
        }

        let indirect = self.indirect_lighting(intersection, albedo, depth, is_sub_sample, rng)?;
        Ok(direct + indirect)
    }

    /// Lambertian contribution of every light that reaches the point.
    fn direct_lighting(&self, intersection: &Intersection, albedo: Color) -> IntersectionResult<Color> {
        let point = intersection.point()?;
        let normal = intersection.normal()?;

        Ok(self
            .lights
            .iter()
            .filter(|light| self.reaches_light(light, point))
            .fold(Color::ZERO, |acc, light| {
                acc + light.lambertian_shading(point, normal, albedo)
            }))
    }

    /// Monte Carlo estimate of one diffuse bounce.
    fn indirect_lighting(
        &self,
        intersection: &Intersection,
        albedo: Color,
        depth: u32,
        is_sub_sample: bool,
        rng: &mut dyn RngCore,
    ) -> IntersectionResult<Color> {
        let samples = self.sample_count(self.config.indirect_samples, is_sub_sample);

        let mut incoming = Color::ZERO;
        for _ in 0..samples {
            let ray = hemisphere_ray(intersection, rng)?;
            incoming += self.trace(&ray, depth + 1, true, rng)?;
        }

        Ok(albedo * incoming / samples as f64)
    }

    fn dielectric_color(
        &self,
        intersection: &Intersection,
        refracted_ray: &Ray,
        reflected_ray: &Ray,
        depth: u32,
        is_sub_sample: bool,
        rng: &mut dyn RngCore,
    ) -> IntersectionResult<Color> {
        if !self.config.enable_fresnel {
            return self.trace(refracted_ray, depth + 1, is_sub_sample, rng);
        }

        let cos_i = intersection
            .source_ray()?
            .direction()
            .dot(intersection.normal()?);
        let reflectance = reflection_coefficient(
            self.config.fresnel_model,
            reflected_ray.refractive_index(),
            refracted_ray.refractive_index(),
            cos_i,
        );

        let samples = self.sample_count(self.config.fresnel_samples, is_sub_sample);
        let mut color = Color::ZERO;
        for _ in 0..samples {
            let ray = match FresnelBranch::choose(reflectance, rng) {
                FresnelBranch::Reflected => reflected_ray,
                FresnelBranch::Refracted => refracted_ray,
            };
            color += self.trace(ray, depth + 1, true, rng)?;
        }

        Ok(color / samples as f64)
    }
}

impl Default for Scene<'_> {
    fn default() -> Self {
        Self::new()
    }
}
