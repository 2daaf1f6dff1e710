//! Hit records produced by cast queries

use slotmap::Key as _;

use crate::foundation::math::{Point3, Vec3};

use super::world::ColliderKey;

/// Result of a cast query against a single collider
///
/// Mirrors the host engine's raycast-hit value struct: which collider was
/// struck, how far along the cast, where, and with what surface normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorHit {
    /// The collider that was hit
    pub collider: ColliderKey,
    /// Travel distance along the cast direction until impact
    pub distance: f32,
    /// The point of impact on the collider surface, in world space
    pub point: Point3,
    /// The surface normal at the impact point, in world space
    pub normal: Vec3,
    /// Index of the struck triangle, for triangle-mesh colliders only
    pub triangle_index: Option<u32>,
}

impl Default for SensorHit {
    fn default() -> Self {
        Self {
            collider: ColliderKey::default(),
            distance: 0.0,
            point: Point3::origin(),
            normal: Vec3::zeros(),
            triangle_index: None,
        }
    }
}

impl SensorHit {
    /// True when this record refers to an actual collider
    ///
    /// Buffer slots beyond the reported hit count keep their default value,
    /// whose key is the null key.
    pub fn is_valid(&self) -> bool {
        !self.collider.is_null()
    }
}
