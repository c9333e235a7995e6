//! Intersectable trait for ray-surface queries.

use crate::{Intersection, Ray};

/// Trait for surfaces that can be hit by rays.
///
/// Implementors return [`Intersection::MISS`] when the ray does not hit, and
/// otherwise a hit carrying point, normal, distance, source ray and exactly
/// one transport classification.
pub trait Intersectable: Send + Sync {
    /// Intersect `ray` with this surface, preferring the nearest hit in
    /// front of the ray origin.
    fn intersect(&self, ray: &Ray) -> Intersection;
}

/// Nearest hit among `surfaces`, or the miss sentinel.
pub fn nearest<'a, I>(surfaces: I, ray: &Ray) -> Intersection
where
    I: IntoIterator<Item = &'a dyn Intersectable>,
{
    surfaces
        .into_iter()
        .map(|surface| surface.intersect(ray))
        .fold(Intersection::MISS, |closest, candidate| {
            if candidate.distance() < closest.distance() {
                candidate
            } else {
                closest
            }
        })
}
