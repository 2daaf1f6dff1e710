//! Shared state and plumbing for overlap sensors
//!
//! An overlap sensor fills its collider buffer directly from one volume
//! query; there are no hit records and no derived cache to invalidate.

use crate::foundation::math::{Point3, Quat, Vec3};
use crate::scene::{ColliderKey, SensorScene};

use super::sensor::{ensure_capacity, SensorSettings};

/// World-space volume an overlap sensor resolved from its configuration
pub(crate) enum ResolvedOverlap {
    /// Sphere volume
    Sphere {
        /// World-space radius
        radius: f32,
    },
    /// Capsule volume
    Capsule {
        /// First endpoint, world space
        a: Point3,
        /// Second endpoint, world space
        b: Point3,
        /// World-space radius
        radius: f32,
    },
    /// Oriented box volume
    Box {
        /// Box orientation
        rotation: Quat,
        /// World-space half extents
        half_extents: Vec3,
    },
}

/// Cached overlap results
#[derive(Debug, Default)]
pub(crate) struct OverlapState {
    colliders: Vec<ColliderKey>,
    hit_count: usize,
}

impl OverlapState {
    /// Create the state, preallocating the buffer unless allocation is lazy
    pub(crate) fn new(settings: &SensorSettings) -> Self {
        let mut state = Self::default();
        if !settings.lazy_allocation {
            ensure_capacity(&mut state.colliders, settings.max_results);
        }
        state
    }

    /// Run the resolved overlap check at `center` and cache the colliders
    pub(crate) fn run(
        &mut self,
        scene: &SensorScene,
        settings: &SensorSettings,
        center: Point3,
        overlap: &ResolvedOverlap,
    ) -> usize {
        ensure_capacity(&mut self.colliders, settings.max_results);

        let filter = settings.filter();
        self.hit_count = match overlap {
            ResolvedOverlap::Sphere { radius } => {
                scene.overlap_sphere(center, *radius, &filter, &mut self.colliders)
            }
            ResolvedOverlap::Capsule { a, b, radius } => {
                scene.overlap_capsule(*a, *b, *radius, &filter, &mut self.colliders)
            }
            ResolvedOverlap::Box {
                rotation,
                half_extents,
            } => scene.overlap_box(center, *rotation, *half_extents, &filter, &mut self.colliders),
        };
        self.hit_count
    }

    /// Number of colliders cached by the last update
    pub(crate) fn hit_count(&self) -> usize {
        self.hit_count
    }

    /// Colliders cached by the last update
    pub(crate) fn hit_colliders(&self) -> &[ColliderKey] {
        &self.colliders[..self.hit_count.min(self.colliders.len())]
    }
}
