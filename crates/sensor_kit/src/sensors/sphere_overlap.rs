//! Sphere / capsule volume sensor

use crate::foundation::math::{Point3, Transform};
use crate::scene::{ColliderKey, SensorScene};

use super::overlap::{OverlapState, ResolvedOverlap};
use super::sensor::{PhysicsSensor, SensorSettings};
use super::utils;

/// Sensor which checks for colliders inside a sphere or capsule volume
///
/// A non-zero width stretches the sphere into a capsule whose axis lies
/// along the transform's local X.
#[derive(Debug)]
pub struct SphereOverlapSensor {
    /// Radius of the sphere, in local units
    pub radius: f32,
    /// Half width of the capsule along local X; zero keeps a sphere
    pub width: f32,
    /// Shared sensor configuration
    pub settings: SensorSettings,
    state: OverlapState,
}

impl SphereOverlapSensor {
    /// Create a sphere overlap sensor with the given radius
    pub fn new(radius: f32) -> Self {
        Self::with_settings(radius, SensorSettings::default())
    }

    /// Create a sphere overlap sensor with explicit settings
    pub fn with_settings(radius: f32, settings: SensorSettings) -> Self {
        Self {
            radius,
            width: 0.0,
            state: OverlapState::new(&settings),
            settings,
        }
    }

    /// Stretch the sphere into a capsule of the given half width
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Resolve the world-space volume for `transform`
    pub(crate) fn resolve(&self, center: Point3, transform: &Transform) -> ResolvedOverlap {
        let scale = transform.scale;

        if self.width != 0.0 {
            let (a, b) = utils::capsule_points(center, transform.rotation, self.width, scale.x);
            ResolvedOverlap::Capsule {
                a,
                b,
                radius: utils::scaled_capsule_radius(self.radius, &scale),
            }
        } else {
            ResolvedOverlap::Sphere {
                radius: utils::scaled_sphere_radius(self.radius, &scale),
            }
        }
    }
}

impl PhysicsSensor for SphereOverlapSensor {
    fn update_sensor(&mut self, scene: &SensorScene, transform: &Transform) -> usize {
        let center = Point3::from(transform.position);
        let overlap = self.resolve(center, transform);
        self.state.run(scene, &self.settings, center, &overlap)
    }

    fn hit_count(&self) -> usize {
        self.state.hit_count()
    }

    fn hit_colliders(&mut self) -> &[ColliderKey] {
        self.state.hit_colliders()
    }
}
