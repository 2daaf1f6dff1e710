//! Scene module - collider registry and physics query binding
//!
//! The scene owns the colliders sensors can detect and exposes the
//! non-allocating ray-cast, shape-cast, and overlap queries that the
//! sensors translate their parameters into. Intersection math itself is
//! parry3d's.

pub mod collider;
pub mod filter;
pub mod hit;
pub mod world;

pub use collider::{Collider, ColliderError};
pub use filter::{QueryFilter, SensorLayers, TriggerInteraction};
pub use hit::SensorHit;
pub use world::{ColliderKey, SceneConfig, SensorScene};

/// Ray type used by cast queries (origin + direction)
pub use parry3d::query::Ray;
