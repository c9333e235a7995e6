//! Random sampling helpers.
//!
//! Every function takes its generator explicitly so each render worker can
//! own one and tests can seed it.

use crate::{Intersection, IntersectionResult, Ray};
use lumen_math::DVec3;
use rand::{Rng, RngCore};
use std::f64::consts::PI;

/// Normals closer than this to the pole switch the basis seed axis.
const POLE_THRESHOLD: f64 = 0.999;

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Two unit tangents orthogonal to `normal` and to each other.
///
/// The seed axis is Z, switched to X when `normal` is nearly parallel to Z
/// where the cross product degenerates.
pub fn orthonormal_basis(normal: DVec3) -> (DVec3, DVec3) {
    let seed = if normal.z.abs() > POLE_THRESHOLD {
        DVec3::X
    } else {
        DVec3::Z
    };
    let t1 = normal.cross(seed).normalize();
    let t2 = normal.cross(t1).normalize();
    (t1, t2)
}

/// Cosine-weighted direction on the hemisphere around `normal`.
pub fn cosine_hemisphere(normal: DVec3, rng: &mut dyn RngCore) -> DVec3 {
    let r1 = gen_f64(rng);
    let r2 = gen_f64(rng);

    let phi = 2.0 * PI * r1;
    let radius = (1.0 - r2).sqrt();
    let x = phi.cos() * radius;
    let y = phi.sin() * radius;
    let z = r2.sqrt();

    let (t1, t2) = orthonormal_basis(normal);
    (t1 * x + t2 * y + normal * z).normalize()
}

/// Offset ray leaving an intersection in a random direction on the side of
/// the surface the incoming ray arrived from.
pub fn hemisphere_ray(intersection: &Intersection, rng: &mut dyn RngCore) -> IntersectionResult<Ray> {
    let point = intersection.point()?;
    let mut normal = intersection.normal()?;
    let incoming = intersection.source_ray()?.direction();

    if normal.dot(incoming) > 0.0 {
        normal = -normal;
    }

    Ok(Ray::new(point, cosine_hemisphere(normal, rng)).with_offset())
}

/// Gaussian 2D offset via Box-Muller, in the XY plane.
pub fn box_muller(stddev: f64, rng: &mut dyn RngCore) -> DVec3 {
    // 1 - u keeps the log argument in (0, 1]
    let u1 = 1.0 - gen_f64(rng);
    let u2 = gen_f64(rng);

    let radius = (-2.0 * u1.ln()).sqrt() * stddev;
    let theta = 2.0 * PI * u2;

    DVec3::new(radius * theta.cos(), radius * theta.sin(), 0.0)
}
