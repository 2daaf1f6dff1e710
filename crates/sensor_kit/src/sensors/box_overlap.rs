//! Oriented-box volume sensor

use crate::foundation::math::{Point3, Transform, Vec3};
use crate::scene::{ColliderKey, SensorScene};

use super::overlap::{OverlapState, ResolvedOverlap};
use super::sensor::{PhysicsSensor, SensorSettings};
use super::utils;

/// Sensor which checks for colliders inside an oriented box volume
///
/// The box sits at the transform position, oriented by its rotation and
/// sized by the configured half extents scaled per axis.
#[derive(Debug)]
pub struct BoxOverlapSensor {
    /// Half extents of the box, in local units
    pub half_extents: Vec3,
    /// Shared sensor configuration
    pub settings: SensorSettings,
    state: OverlapState,
}

impl BoxOverlapSensor {
    /// Create a box overlap sensor with the given half extents
    pub fn new(half_extents: Vec3) -> Self {
        Self::with_settings(half_extents, SensorSettings::default())
    }

    /// Create a box overlap sensor with explicit settings
    pub fn with_settings(half_extents: Vec3, settings: SensorSettings) -> Self {
        Self {
            half_extents,
            state: OverlapState::new(&settings),
            settings,
        }
    }
}

impl PhysicsSensor for BoxOverlapSensor {
    fn update_sensor(&mut self, scene: &SensorScene, transform: &Transform) -> usize {
        let overlap = ResolvedOverlap::Box {
            rotation: transform.rotation,
            half_extents: utils::scaled_box_half_extents(&self.half_extents, &transform.scale),
        };
        self.state.run(
            scene,
            &self.settings,
            Point3::from(transform.position),
            &overlap,
        )
    }

    fn hit_count(&self) -> usize {
        self.state.hit_count()
    }

    fn hit_colliders(&mut self) -> &[ColliderKey] {
        self.state.hit_colliders()
    }
}
