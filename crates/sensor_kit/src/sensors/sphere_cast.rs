//! Swept ray / sphere / capsule sensor

use crate::foundation::math::{Quat, Transform};
use crate::scene::{ColliderKey, Ray, SensorHit, SensorScene};

use super::cast::{sensor_ray, CastState, ResolvedCast};
use super::sensor::{PhysicsSensor, SensorSettings};
use super::utils;

/// Sensor which casts a ray, sphere, or capsule along its transform's Z axis
///
/// With zero radius it degenerates to a plain ray cast; a non-zero width
/// stretches the sphere into a capsule whose axis lies along the
/// transform's local X.
#[derive(Debug)]
pub struct SphereCastSensor {
    /// Radius of the sphere, in local units; zero casts a ray
    pub radius: f32,
    /// Half width of the capsule along local X; zero keeps a sphere
    pub width: f32,
    /// Maximum cast distance, in local units along Z
    pub max_distance: f32,
    /// Overrides the cast direction, making rotated-shape casts possible;
    /// the transform rotation is used when unset
    pub direction_override: Option<Quat>,
    /// Shared sensor configuration
    pub settings: SensorSettings,
    state: CastState,
}

impl SphereCastSensor {
    /// Create a sphere cast sensor with the given radius
    pub fn new(radius: f32) -> Self {
        Self::with_settings(radius, SensorSettings::default())
    }

    /// Create a sphere cast sensor with explicit settings
    pub fn with_settings(radius: f32, settings: SensorSettings) -> Self {
        Self {
            radius,
            width: 0.0,
            max_distance: f32::INFINITY,
            direction_override: None,
            state: CastState::new(&settings),
            settings,
        }
    }

    /// Stretch the sphere into a capsule of the given half width
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
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

    /// Resolve the world-space swept shape for `transform`
    pub(crate) fn resolve(&self, ray: &Ray, transform: &Transform) -> ResolvedCast {
        let scale = transform.scale;

        if self.width != 0.0 {
            let (a, b) = utils::capsule_points(ray.origin, transform.rotation, self.width, scale.x);
            ResolvedCast::Capsule {
                a,
                b,
                radius: utils::scaled_capsule_radius(self.radius, &scale),
            }
        } else if self.radius != 0.0 {
            ResolvedCast::Sphere {
                radius: utils::scaled_sphere_radius(self.radius, &scale),
            }
        } else {
            ResolvedCast::Ray
        }
    }
}

impl PhysicsSensor for SphereCastSensor {
    fn update_sensor(&mut self, scene: &SensorScene, transform: &Transform) -> usize {
        let ray = self.ray(transform);
        let distance = self.cast_distance(transform);
        let cast = self.resolve(&ray, transform);
        self.state.run(scene, &self.settings, &ray, distance, &cast)
    }

    fn hit_count(&self) -> usize {
        self.state.hit_count()
    }

    fn hit_colliders(&mut self) -> &[ColliderKey] {
        self.state.hit_colliders()
    }
}
