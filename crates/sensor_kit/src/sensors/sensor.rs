//! Shared sensor state and the common sensor read surface
//!
//! Every sensor runs one physics query per update and caches the results
//! in buffers preallocated to a configurable capacity, so steady-state
//! updates never allocate.

use crate::foundation::math::Transform;
use crate::scene::{ColliderKey, QueryFilter, SensorLayers, SensorScene, TriggerInteraction};

/// Configuration shared by every sensor kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SensorSettings {
    /// If true, result buffers are allocated on first use instead of at
    /// construction. Saves memory for sensors that may never fire.
    pub lazy_allocation: bool,

    /// Maximum number of hits a single update can report
    ///
    /// Buffers are sized to this; changing it takes effect on the next
    /// update, which recreates them. A capacity of exactly 1 switches
    /// queries to their closest-hit variant.
    pub max_results: usize,

    /// Layers this sensor detects
    pub layer_mask: SensorLayers,

    /// Whether this sensor detects trigger colliders
    pub trigger_interaction: TriggerInteraction,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            lazy_allocation: false,
            max_results: 1,
            layer_mask: SensorLayers::ALL,
            trigger_interaction: TriggerInteraction::UseGlobal,
        }
    }
}

impl SensorSettings {
    /// The query filter these settings describe
    pub fn filter(&self) -> QueryFilter {
        QueryFilter::new(self.layer_mask).with_trigger_interaction(self.trigger_interaction)
    }
}

/// Common read/update surface implemented by every sensor
pub trait PhysicsSensor {
    /// Run the sensor's physics query and cache the results
    ///
    /// Returns the number of hits, the same value [`hit_count`] reports
    /// afterwards.
    ///
    /// [`hit_count`]: PhysicsSensor::hit_count
    fn update_sensor(&mut self, scene: &SensorScene, transform: &Transform) -> usize;

    /// Number of colliders detected by the last update
    fn hit_count(&self) -> usize;

    /// Colliders detected by the last update
    ///
    /// For cast sensors this lazily rebuilds the collider list from the
    /// cached hit records, hence `&mut self`.
    fn hit_colliders(&mut self) -> &[ColliderKey];

    /// Did the last update detect anything?
    fn has_hit(&self) -> bool {
        self.hit_count() > 0
    }

    /// First detected collider, if any
    fn hit_collider(&mut self) -> Option<ColliderKey> {
        self.hit_colliders().first().copied()
    }
}

/// Recreate `buf` when its length no longer matches the configured capacity
pub(crate) fn ensure_capacity<T: Clone + Default>(buf: &mut Vec<T>, capacity: usize) {
    if buf.len() != capacity {
        *buf = vec![T::default(); capacity];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = SensorSettings::default();

        assert_eq!(settings.max_results, 1);
        assert!(!settings.lazy_allocation);
        assert_eq!(settings.layer_mask, SensorLayers::ALL);
        assert_eq!(settings.trigger_interaction, TriggerInteraction::UseGlobal);
    }

    #[test]
    fn test_ensure_capacity_recreates_on_mismatch() {
        let mut buf = vec![7_u32; 4];

        ensure_capacity(&mut buf, 2);
        assert_eq!(buf, vec![0, 0]);

        ensure_capacity(&mut buf, 2);
        buf[0] = 9;
        ensure_capacity(&mut buf, 2);
        // Same capacity: contents survive.
        assert_eq!(buf[0], 9);
    }

    #[test]
    fn test_ensure_capacity_zero() {
        let mut buf = vec![1_u32];
        ensure_capacity(&mut buf, 0);
        assert!(buf.is_empty());
    }
}
