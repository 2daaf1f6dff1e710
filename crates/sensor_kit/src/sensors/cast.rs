//! Shared state and plumbing for cast sensors
//!
//! A cast sensor fires one swept-shape query per update and keeps two
//! buffers: the hit records the engine filled in, and a collider list
//! derived from them. The collider list is only rebuilt when someone asks
//! for it after an update invalidated it.

use crate::foundation::math::{Point3, Quat, Transform, Vec3};
use crate::scene::{ColliderKey, Ray, SensorHit, SensorScene};

use super::sensor::{ensure_capacity, SensorSettings};
use super::utils;

/// The ray a cast sensor will fire for a given transform
///
/// Origin is the transform position; direction is the cast rotation's
/// local Z axis, flipped when the Z scale is negative (mirrored objects
/// cast backwards).
pub(crate) fn sensor_ray(transform: &Transform, direction_override: Option<Quat>) -> Ray {
    let rotation = direction_override.unwrap_or(transform.rotation);
    let forward = if transform.scale.z > 0.0 { 1.0 } else { -1.0 };
    Ray::new(
        Point3::from(transform.position),
        rotation * Vec3::new(0.0, 0.0, forward),
    )
}

/// World-space shape a cast sensor resolved from its configuration
pub(crate) enum ResolvedCast {
    /// Plain ray cast
    Ray,
    /// Sphere swept along the ray
    Sphere {
        /// World-space radius
        radius: f32,
    },
    /// Capsule swept along the ray
    Capsule {
        /// First endpoint, world space
        a: Point3,
        /// Second endpoint, world space
        b: Point3,
        /// World-space radius
        radius: f32,
    },
    /// Oriented box swept along the ray
    Box {
        /// Box orientation
        rotation: Quat,
        /// World-space half extents
        half_extents: Vec3,
    },
}

/// Cached cast results
#[derive(Debug, Default)]
pub(crate) struct CastState {
    ray_hits: Vec<SensorHit>,
    colliders: Vec<ColliderKey>,
    hit_count: usize,
    colliders_outdated: bool,
}

impl CastState {
    /// Create the state, preallocating buffers unless allocation is lazy
    pub(crate) fn new(settings: &SensorSettings) -> Self {
        let mut state = Self::default();
        if !settings.lazy_allocation {
            ensure_capacity(&mut state.ray_hits, settings.max_results);
            ensure_capacity(&mut state.colliders, settings.max_results);
        }
        state
    }

    /// Fire the resolved cast and cache the hits
    pub(crate) fn run(
        &mut self,
        scene: &SensorScene,
        settings: &SensorSettings,
        ray: &Ray,
        distance: f32,
        cast: &ResolvedCast,
    ) -> usize {
        ensure_capacity(&mut self.ray_hits, settings.max_results);
        ensure_capacity(&mut self.colliders, settings.max_results);

        let filter = settings.filter();
        self.hit_count = match cast {
            ResolvedCast::Ray => scene.cast_ray(ray, distance, &filter, &mut self.ray_hits),
            ResolvedCast::Sphere { radius } => scene.cast_sphere(
                ray.origin,
                *radius,
                &ray.dir,
                distance,
                &filter,
                &mut self.ray_hits,
            ),
            ResolvedCast::Capsule { a, b, radius } => scene.cast_capsule(
                *a,
                *b,
                *radius,
                &ray.dir,
                distance,
                &filter,
                &mut self.ray_hits,
            ),
            ResolvedCast::Box {
                rotation,
                half_extents,
            } => scene.cast_box(
                ray.origin,
                *rotation,
                *half_extents,
                &ray.dir,
                distance,
                &filter,
                &mut self.ray_hits,
            ),
        };
        self.colliders_outdated = true;
        self.hit_count
    }

    /// Number of hits cached by the last update
    pub(crate) fn hit_count(&self) -> usize {
        self.hit_count
    }

    /// Hit records cached by the last update
    pub(crate) fn ray_hits(&self) -> &[SensorHit] {
        &self.ray_hits[..self.hit_count.min(self.ray_hits.len())]
    }

    /// First cached hit, if any
    pub(crate) fn ray_hit(&self) -> Option<&SensorHit> {
        self.ray_hits().first()
    }

    /// Closest cached hit, if any
    ///
    /// Batch queries fill the buffer unordered, so this scans for the
    /// minimum distance. With a single hit there is nothing to scan.
    pub(crate) fn closest_ray_hit(&self) -> Option<&SensorHit> {
        let hits = self.ray_hits();
        match hits.len() {
            0 => None,
            1 => Some(&hits[0]),
            _ => hits.iter().min_by(|a, b| a.distance.total_cmp(&b.distance)),
        }
    }

    /// Colliders derived from the cached hit records
    ///
    /// Rebuilt on demand after an update marked the list outdated.
    pub(crate) fn hit_colliders(&mut self) -> &[ColliderKey] {
        if self.colliders_outdated {
            let count = self.hit_count.min(self.ray_hits.len()).min(self.colliders.len());
            for i in 0..count {
                self.colliders[i] = self.ray_hits[i].collider;
            }
            self.colliders_outdated = false;
        }
        &self.colliders[..self.hit_count.min(self.colliders.len())]
    }
}
