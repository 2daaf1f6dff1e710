//! Serializable sensor descriptions
//!
//! A suite config lists the sensors an object carries; [`SensorSuiteConfig::build`]
//! turns it into live sensors. Layer masks are stored as raw bits so the
//! files stay plain numbers.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Transform, Vec3};
use crate::scene::{ColliderKey, SensorLayers, SensorScene, TriggerInteraction};
use crate::sensors::{
    BoxCastSensor, BoxOverlapSensor, PhysicsSensor, SensorSettings, SphereCastSensor,
    SphereOverlapSensor,
};

use super::Config;

mod defaults {
    pub fn max_results() -> usize {
        1
    }

    pub fn layer_mask() -> u32 {
        u32::MAX
    }

    pub fn max_distance() -> f32 {
        f32::INFINITY
    }
}

/// Settings shared by every sensor description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorCommon {
    /// Name used in logs; empty names get a positional one at build time
    #[serde(default)]
    pub name: String,

    /// Result buffer capacity
    #[serde(default = "defaults::max_results")]
    pub max_results: usize,

    /// Allocate result buffers on first use instead of at construction
    #[serde(default)]
    pub lazy_allocation: bool,

    /// Raw bits of the layer mask the sensor detects
    #[serde(default = "defaults::layer_mask")]
    pub layer_mask: u32,

    /// Trigger handling
    #[serde(default)]
    pub trigger_interaction: TriggerInteraction,
}

impl Default for SensorCommon {
    fn default() -> Self {
        Self {
            name: String::new(),
            max_results: defaults::max_results(),
            lazy_allocation: false,
            layer_mask: defaults::layer_mask(),
            trigger_interaction: TriggerInteraction::default(),
        }
    }
}

impl SensorCommon {
    /// The sensor settings these values describe
    pub fn settings(&self) -> SensorSettings {
        SensorSettings {
            lazy_allocation: self.lazy_allocation,
            max_results: self.max_results,
            layer_mask: SensorLayers::from_bits_truncate(self.layer_mask),
            trigger_interaction: self.trigger_interaction,
        }
    }
}

/// Description of a single sensor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SensorSpec {
    /// Swept oriented box
    BoxCast {
        /// Shared settings
        #[serde(default)]
        common: SensorCommon,
        /// Half extents of the box, `[x, y, z]`
        half_extents: [f32; 3],
        /// Maximum cast distance
        #[serde(default = "defaults::max_distance")]
        max_distance: f32,
    },

    /// Swept ray, sphere, or capsule
    SphereCast {
        /// Shared settings
        #[serde(default)]
        common: SensorCommon,
        /// Sphere radius; zero casts a ray
        #[serde(default)]
        radius: f32,
        /// Capsule half width; zero keeps a sphere
        #[serde(default)]
        width: f32,
        /// Maximum cast distance
        #[serde(default = "defaults::max_distance")]
        max_distance: f32,
    },

    /// Oriented box volume
    BoxOverlap {
        /// Shared settings
        #[serde(default)]
        common: SensorCommon,
        /// Half extents of the box, `[x, y, z]`
        half_extents: [f32; 3],
    },

    /// Sphere or capsule volume
    SphereOverlap {
        /// Shared settings
        #[serde(default)]
        common: SensorCommon,
        /// Sphere radius
        radius: f32,
        /// Capsule half width; zero keeps a sphere
        #[serde(default)]
        width: f32,
    },
}

impl SensorSpec {
    fn common(&self) -> &SensorCommon {
        match self {
            Self::BoxCast { common, .. }
            | Self::SphereCast { common, .. }
            | Self::BoxOverlap { common, .. }
            | Self::SphereOverlap { common, .. } => common,
        }
    }

    /// Construct the sensor this description names
    pub fn build(&self) -> BuiltSensor {
        match self {
            Self::BoxCast {
                common,
                half_extents,
                max_distance,
            } => BuiltSensor::BoxCast(
                BoxCastSensor::with_settings(Vec3::from(*half_extents), common.settings())
                    .with_max_distance(*max_distance),
            ),
            Self::SphereCast {
                common,
                radius,
                width,
                max_distance,
            } => BuiltSensor::SphereCast(
                SphereCastSensor::with_settings(*radius, common.settings())
                    .with_width(*width)
                    .with_max_distance(*max_distance),
            ),
            Self::BoxOverlap {
                common,
                half_extents,
            } => BuiltSensor::BoxOverlap(BoxOverlapSensor::with_settings(
                Vec3::from(*half_extents),
                common.settings(),
            )),
            Self::SphereOverlap {
                common,
                radius,
                width,
            } => BuiltSensor::SphereOverlap(
                SphereOverlapSensor::with_settings(*radius, common.settings()).with_width(*width),
            ),
        }
    }
}

/// A built sensor of any kind
#[derive(Debug)]
pub enum BuiltSensor {
    /// Swept oriented box
    BoxCast(BoxCastSensor),
    /// Swept ray, sphere, or capsule
    SphereCast(SphereCastSensor),
    /// Oriented box volume
    BoxOverlap(BoxOverlapSensor),
    /// Sphere or capsule volume
    SphereOverlap(SphereOverlapSensor),
}

impl PhysicsSensor for BuiltSensor {
    fn update_sensor(&mut self, scene: &SensorScene, transform: &Transform) -> usize {
        match self {
            Self::BoxCast(sensor) => sensor.update_sensor(scene, transform),
            Self::SphereCast(sensor) => sensor.update_sensor(scene, transform),
            Self::BoxOverlap(sensor) => sensor.update_sensor(scene, transform),
            Self::SphereOverlap(sensor) => sensor.update_sensor(scene, transform),
        }
    }

    fn hit_count(&self) -> usize {
        match self {
            Self::BoxCast(sensor) => sensor.hit_count(),
            Self::SphereCast(sensor) => sensor.hit_count(),
            Self::BoxOverlap(sensor) => sensor.hit_count(),
            Self::SphereOverlap(sensor) => sensor.hit_count(),
        }
    }

    fn hit_colliders(&mut self) -> &[ColliderKey] {
        match self {
            Self::BoxCast(sensor) => sensor.hit_colliders(),
            Self::SphereCast(sensor) => sensor.hit_colliders(),
            Self::BoxOverlap(sensor) => sensor.hit_colliders(),
            Self::SphereOverlap(sensor) => sensor.hit_colliders(),
        }
    }
}

/// A built sensor together with its configured name
#[derive(Debug)]
pub struct NamedSensor {
    /// Name from the config, or `sensor_<index>` when unnamed
    pub name: String,
    /// The sensor itself
    pub sensor: BuiltSensor,
}

/// The full sensor suite an object carries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorSuiteConfig {
    /// Sensor descriptions, in update order
    #[serde(default)]
    pub sensors: Vec<SensorSpec>,
}

impl Config for SensorSuiteConfig {}

impl SensorSuiteConfig {
    /// Build every described sensor
    pub fn build(&self) -> Vec<NamedSensor> {
        self.sensors
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let configured = &spec.common().name;
                let name = if configured.is_empty() {
                    format!("sensor_{index}")
                } else {
                    configured.clone()
                };
                NamedSensor {
                    name,
                    sensor: spec.build(),
                }
            })
            .collect()
    }
}
