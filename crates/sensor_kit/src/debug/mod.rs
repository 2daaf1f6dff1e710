//! Debug visualization support
//!
//! Shape collection for host renderers plus gizmo emission for sensors.

pub mod draw;
pub mod sensor_debug;

pub use draw::{DebugDrawSystem, DebugShape, DebugShapeId};
pub use sensor_debug::{SensorGizmoColors, SensorGizmos};
