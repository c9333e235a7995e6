//! Lumen Renderer - recursive light transport over sphere scenes
//!
//! A Monte Carlo ray tracer for diffuse, mirror and dielectric spheres lit
//! by point lights, with optional indirect lighting, stochastic Fresnel
//! mixing and Gaussian antialiasing.

mod bucket;
mod camera;
mod config;
mod intersectable;
mod intersection;
mod light;
mod renderer;
mod sampling;
mod scene;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use config::{ConfigError, ConfigResult, FresnelModel, RenderConfig, TraceConfig};
pub use intersectable::{nearest, Intersectable};
pub use intersection::{Intersection, IntersectionBuilder, IntersectionError, IntersectionResult, Transport};
pub use light::PointLight;
pub use renderer::{color_to_rgb, render, render_pixel, ImageBuffer};
pub use sampling::{box_muller, cosine_hemisphere, hemisphere_ray, orthonormal_basis};
pub use scene::{reflection_coefficient, FresnelBranch, Scene};
pub use sphere::{Sphere, SphereBuildError, SphereBuilder};

/// Re-export the ray and vector types from lumen_math
pub use lumen_math::{DVec3, Ray, RAY_OFFSET_EPSILON};

/// Linear radiance, one channel per component.
pub type Color = DVec3;
