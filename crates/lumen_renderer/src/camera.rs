//! Camera for ray generation.

use crate::{sampling::box_muller, Ray};
use lumen_math::DVec3;
use rand::RngCore;

/// Pinhole camera generating unit-direction rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // Camera positioning
    look_from: DVec3,
    look_at: DVec3,
    vup: DVec3,

    // Vertical field of view in degrees
    vfov: f64,

    // Cached computed values (set by initialize())
    center: DVec3,
    pixel00_loc: DVec3,
    pixel_delta_u: DVec3,
    pixel_delta_v: DVec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 512,
            image_height: 512,
            look_from: DVec3::new(0.0, 0.0, 55.0),
            look_at: DVec3::ZERO,
            vup: DVec3::Y,
            vfov: 75.0,
            // Cached values (initialized to defaults)
            center: DVec3::ZERO,
            pixel00_loc: DVec3::ZERO,
            pixel_delta_u: DVec3::ZERO,
            pixel_delta_v: DVec3::ZERO,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: DVec3, look_at: DVec3, vup: DVec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f64) -> Self {
        self.vfov = vfov;
        self
    }

    /// Initialize the camera (must be called before generating rays).
    pub fn initialize(&mut self) {
        self.center = self.look_from;

        // Viewport one unit in front of the camera
        let h = (self.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Camera basis vectors
        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left = self.center - w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Ray through the center of pixel (i, j).
    pub fn center_ray(&self, i: u32, j: u32) -> Ray {
        self.ray_through(i as f64, j as f64)
    }

    /// Ray through pixel (i, j) jittered by a Gaussian offset with the given
    /// standard deviation in pixels.
    pub fn jittered_ray(&self, i: u32, j: u32, stddev: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = box_muller(stddev, rng);
        self.ray_through(i as f64 + offset.x, j as f64 + offset.y)
    }

    fn ray_through(&self, x: f64, y: f64) -> Ray {
        let pixel_sample = self.pixel00_loc + x * self.pixel_delta_u + y * self.pixel_delta_v;
        Ray::new(self.center, (pixel_sample - self.center).normalize())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
