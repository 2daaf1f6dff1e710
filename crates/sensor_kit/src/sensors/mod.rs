//! Sensor components: shape casts and volume overlaps
//!
//! Five configurations over the same pattern: compute world-space query
//! parameters from a transform, fire one non-allocating scene query, and
//! cache the results in buffers sized to `max_results`.

pub(crate) mod cast;
pub(crate) mod overlap;

pub mod box_cast;
pub mod box_overlap;
pub mod sensor;
pub mod sphere_cast;
pub mod sphere_overlap;
pub mod utils;

pub use box_cast::BoxCastSensor;
pub use box_overlap::BoxOverlapSensor;
pub use sensor::{PhysicsSensor, SensorSettings};
pub use sphere_cast::SphereCastSensor;
pub use sphere_overlap::SphereOverlapSensor;

#[cfg(test)]
mod tests;
