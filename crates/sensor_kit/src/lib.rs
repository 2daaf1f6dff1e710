//! # Sensor Kit
//!
//! Configurable physics sensors over non-allocating shape queries.
//!
//! ## Features
//!
//! - **Cast Sensors**: swept box, ray, sphere, and capsule detection at a distance
//! - **Overlap Sensors**: box, sphere, and capsule volume checks
//! - **Scale Aware**: shape radii and cast distances follow the owning transform's non-uniform scale
//! - **No Per-Update Allocation**: result buffers are preallocated to a configurable capacity
//! - **Layer Filtering**: bitmask layers and trigger-interaction control per sensor
//! - **Debug Gizmos**: wireframe overlays collected for the host renderer
//! - **Data Driven**: sensor suites loadable from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use sensor_kit::prelude::*;
//!
//! let mut scene = SensorScene::new();
//! scene.add_collider(Collider::ball(0.5).at(Vec3::new(0.0, 0.0, 3.0)).named("drone"));
//!
//! // A sphere of radius 0.25 swept along the transform's Z axis.
//! let mut sensor = SphereCastSensor::new(0.25);
//! let hits = sensor.update_sensor(&scene, &Transform::identity());
//!
//! assert_eq!(hits, 1);
//! assert!(sensor.has_hit());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod debug;
pub mod foundation;
pub mod scene;
pub mod sensors;

/// Common imports for sensor users
pub mod prelude {
    pub use crate::config::{Config, SensorSuiteConfig};
    pub use crate::debug::{DebugDrawSystem, DebugShape, SensorGizmos};
    pub use crate::foundation::math::{Point3, Quat, Transform, Vec3};
    pub use crate::scene::{
        Collider, ColliderKey, QueryFilter, Ray, SceneConfig, SensorHit, SensorLayers,
        SensorScene, TriggerInteraction,
    };
    pub use crate::sensors::{
        BoxCastSensor, BoxOverlapSensor, PhysicsSensor, SensorSettings, SphereCastSensor,
        SphereOverlapSensor,
    };
}
