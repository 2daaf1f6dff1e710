//! Swept-box sensor

use crate::foundation::math::{Quat, Transform, Vec3};
use crate::scene::{ColliderKey, Ray, SensorHit, SensorScene};

use super::cast::{sensor_ray, CastState, ResolvedCast};
use super::sensor::{PhysicsSensor, SensorSettings};
use super::utils;

/// Sensor which casts an oriented box along its transform's Z axis
///
/// The box is oriented by the transform rotation and sized by the
/// configured half extents scaled per axis; the cast direction can be
/// overridden independently of the box orientation.
#[derive(Debug)]
pub struct BoxCastSensor {
    /// Half extents of the box, in local units
    pub half_extents: Vec3,
    /// Maximum cast distance, in local units along Z
    pub max_distance: f32,
    /// Overrides the cast direction, making rotated-shape casts possible;
    /// the transform rotation is used when unset
    pub direction_override: Option<Quat>,
    /// Shared sensor configuration
    pub settings: SensorSettings,
    state: CastState,
}

impl BoxCastSensor {
    /// Create a box cast sensor with the given half extents
    pub fn new(half_extents: Vec3) -> Self {
        Self::with_settings(half_extents, SensorSettings::default())
    }

    /// Create a box cast sensor with explicit settings
    pub fn with_settings(half_extents: Vec3, settings: SensorSettings) -> Self {
        Self {
            half_extents,
            max_distance: f32::INFINITY,
            direction_override: None,
            state: CastState::new(&settings),
            settings,
        }
    }

    /// Limit the cast distance
    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// The ray this sensor would fire for `transform`
    pub fn ray(&self, transform: &Transform) -> Ray {
        sensor_ray(transform, self.direction_override)
    }

    /// Actual cast distance for `transform`, scale applied
    pub fn cast_distance(&self, transform: &Transform) -> f32 {
        utils::scaled_cast_distance(self.max_distance, &transform.scale)
    }

    /// Hit records from the last update, unordered
    pub fn ray_hits(&self) -> &[SensorHit] {
        self.state.ray_hits()
    }

    /// First hit record from the last update
    pub fn ray_hit(&self) -> Option<&SensorHit> {
        self.state.ray_hit()
    }

    /// Closest hit record from the last update
    pub fn closest_ray_hit(&self) -> Option<&SensorHit> {
        self.state.closest_ray_hit()
    }
}

impl PhysicsSensor for BoxCastSensor {
    fn update_sensor(&mut self, scene: &SensorScene, transform: &Transform) -> usize {
        let ray = self.ray(transform);
        let distance = self.cast_distance(transform);
        let cast = ResolvedCast::Box {
            rotation: transform.rotation,
            half_extents: utils::scaled_box_half_extents(&self.half_extents, &transform.scale),
        };
        self.state.run(scene, &self.settings, &ray, distance, &cast)
    }

    fn hit_count(&self) -> usize {
        self.state.hit_count()
    }

    fn hit_colliders(&mut self) -> &[ColliderKey] {
        self.state.hit_colliders()
    }
}
