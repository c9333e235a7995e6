//! Image renderer.
//!
//! Averages camera rays per pixel, renders buckets in parallel with rayon
//! and quantizes radiance into an 8-bit RGB image.

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::{Camera, Color, IntersectionResult, RenderConfig, Scene};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Radiance seen through pixel (x, y).
///
/// With antialiasing every jittered camera ray is shaded with single-sample
/// estimators and the results are averaged. Without it one centered ray is
/// shaded with the full sample counts.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene<'_>,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> IntersectionResult<Color> {
    if !config.enable_antialiasing {
        let ray = camera.center_ray(x, y);
        let intersection = scene.intersect(&ray);
        return scene.color_of(&intersection, true, rng);
    }

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.antialiasing_samples {
        let ray = camera.jittered_ray(x, y, config.antialiasing_stddev, rng);
        let intersection = scene.intersect(&ray);
        pixel_color += scene.color_of(&intersection, false, rng)?;
    }

    Ok(pixel_color / config.antialiasing_samples as f64)
}

/// Quantize one radiance channel: `min(255, c^gamma)`.
#[inline]
fn quantize(channel: f64, gamma: f64) -> u8 {
    channel.max(0.0).powf(gamma).min(255.0) as u8
}

/// Convert a color to 8-bit RGB.
///
/// Radiance is on a 0-255 scale, so only the exponent is applied before
/// clamping.
pub fn color_to_rgb(color: Color, gamma: f64) -> [u8; 3] {
    [
        quantize(color.x, gamma),
        quantize(color.y, gamma),
        quantize(color.z, gamma),
    ]
}

/// Linear radiance buffer for render output.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Copy a finished bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Gamma-corrected image ready for encoding.
    pub fn to_image(&self, gamma: f64) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(color_to_rgb(self.get(x, y), gamma))
        })
    }

    /// Encode as an image file; the format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>, gamma: f64) -> image::ImageResult<()> {
        self.to_image(gamma).save(path)
    }
}

/// Render the entire scene to an image buffer.
///
/// Buckets run in parallel, each with a generator seeded from
/// `config.seed` and its index, so output is deterministic for a seed.
pub fn render(camera: &Camera, scene: &Scene<'_>, config: &RenderConfig) -> IntersectionResult<ImageBuffer> {
    let start = Instant::now();
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);
    info!(
        "Rendering {}x{} in {} buckets, {} rays per pixel",
        config.width,
        config.height,
        buckets.len(),
        config.rays_per_pixel()
    );

    let results = buckets
        .par_iter()
        .map(|bucket| -> IntersectionResult<BucketResult> {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(bucket.index as u64));
            let pixels = render_bucket(bucket, camera, scene, config, &mut rng)?;
            debug!("Bucket {} at ({}, {}) done", bucket.index, bucket.x, bucket.y);
            Ok(BucketResult::new(*bucket, pixels))
        })
        .collect::<IntersectionResult<Vec<_>>>()?;

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.write_bucket(result);
    }

    info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PointLight, Sphere, TraceConfig};
    use lumen_math::DVec3;

    #[test]
    fn test_quantize_clamps() {
        assert_eq!(color_to_rgb(Color::ZERO, 0.5), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::splat(1e9), 0.5), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(100.0, -4.0, 16.0), 0.5), [10, 0, 4]);
        assert_eq!(color_to_rgb(Color::new(200.0, 0.0, 0.0), 1.0), [200, 0, 0]);
    }

    #[test]
    fn test_image_buffer_index_past_u32() {
        // 70000 * 70000 overflows u32
        let image = ImageBuffer {
            width: 70_000,
            height: 70_000,
            pixels: Vec::new(),
        };
        assert_eq!(image.index(69_999, 69_999), 70_000usize * 70_000 - 1);
    }

    #[test]
    fn test_image_buffer_get_set() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(3, 2, Color::X);
        assert_eq!(image.get(3, 2), Color::X);
        assert_eq!(image.get(0, 0), Color::ZERO);
        assert_eq!(image.to_image(1.0).get_pixel(3, 2).0, [1, 0, 0]);
    }

    fn fixture() -> (Sphere, PointLight, Camera, RenderConfig) {
        let sphere = Sphere::builder()
            .center(DVec3::new(0.0, 0.0, -5.0))
            .radius(1.5)
            .color(Color::new(1.0, 0.5, 0.25))
            .build()
            .unwrap();
        let light = PointLight::new(DVec3::new(0.0, 5.0, 0.0), 1e6);

        let mut camera = Camera::new()
            .with_resolution(12, 8)
            .with_position(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0), DVec3::Y)
            .with_fov(60.0);
        camera.initialize();

        let config = RenderConfig {
            width: 12,
            height: 8,
            bucket_size: 5,
            antialiasing_samples: 4,
            trace: TraceConfig {
                indirect_samples: 4,
                fresnel_samples: 4,
                ..Default::default()
            },
            ..Default::default()
        };

        (sphere, light, camera, config)
    }

    #[test]
    fn test_render_is_deterministic_per_seed() {
        let (sphere, light, camera, config) = fixture();
        let mut scene = Scene::with_config(config.trace.clone());
        scene.add_surface(&sphere).add_light(&light);

        let a = render(&camera, &scene, &config).unwrap();
        let b = render(&camera, &scene, &config).unwrap();

        assert_eq!(a.pixels, b.pixels);
        assert_eq!(a.pixels.len(), 12 * 8);
    }

    #[test]
    fn test_render_sees_lit_sphere() {
        let (sphere, light, camera, config) = fixture();
        let mut scene = Scene::with_config(config.trace.clone());
        scene.add_surface(&sphere).add_light(&light);

        let image = render(&camera, &scene, &config).unwrap();

        // Middle of the frame is on the sphere, the corner misses everything
        assert!(image.get(6, 4).x > 0.0);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_render_without_antialiasing_uses_center_ray() {
        let (sphere, light, camera, mut config) = fixture();
        config.enable_antialiasing = false;
        config.trace.enable_indirect_lighting = false;
        let mut scene = Scene::with_config(config.trace.clone());
        scene.add_surface(&sphere).add_light(&light);

        let mut rng = StdRng::seed_from_u64(0);
        let pixel = render_pixel(&camera, &scene, 6, 4, &config, &mut rng).unwrap();
        let expected = scene
            .color_of(&scene.intersect(&camera.center_ray(6, 4)), true, &mut rng)
            .unwrap();

        assert_eq!(pixel, expected);
    }
}
