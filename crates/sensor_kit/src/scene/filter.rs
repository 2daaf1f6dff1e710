//! Query filtering: collision layers and trigger interaction
//!
//! Sensors filter which colliders a query may report before any
//! narrow-phase work happens. Two mechanisms compose:
//! - a layer bitmask matched against the collider's layer bits, and
//! - a trigger-interaction mode deciding whether trigger volumes count.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::collider::Collider;

bitflags! {
    /// Collision layers for filtering which colliders a query can see
    ///
    /// Each layer is a bit in a 32-bit mask. Colliders can belong to several
    /// layers, and sensors carry a mask of the layers they detect.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SensorLayers: u32 {
        /// Default layer for most objects
        const DEFAULT = 1 << 0;
        /// Player character layer
        const PLAYER = 1 << 1;
        /// Enemy/NPC layer
        const ENEMY = 1 << 2;
        /// Static world geometry (floors, walls)
        const ENVIRONMENT = 1 << 3;
        /// Projectiles (bullets, spells)
        const PROJECTILE = 1 << 4;
        /// Collectible items (coins, powerups)
        const PICKUP = 1 << 5;
        /// All layers
        const ALL = 0xFFFF_FFFF;
    }
}

impl Default for SensorLayers {
    fn default() -> Self {
        Self::ALL
    }
}

/// How a query treats trigger colliders
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerInteraction {
    /// Follow the scene-wide default (see `SceneConfig::queries_hit_triggers`)
    #[default]
    UseGlobal,
    /// Report trigger colliders regardless of the scene default
    Collide,
    /// Skip trigger colliders regardless of the scene default
    Ignore,
}

/// Filter applied to every collider before a narrow-phase query runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryFilter {
    /// Layers the query is allowed to report
    pub layer_mask: SensorLayers,
    /// How trigger colliders are treated
    pub trigger_interaction: TriggerInteraction,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            layer_mask: SensorLayers::ALL,
            trigger_interaction: TriggerInteraction::UseGlobal,
        }
    }
}

impl QueryFilter {
    /// Create a filter for the given layer mask with default trigger handling
    pub fn new(layer_mask: SensorLayers) -> Self {
        Self {
            layer_mask,
            ..Default::default()
        }
    }

    /// Override the trigger-interaction mode
    pub fn with_trigger_interaction(mut self, mode: TriggerInteraction) -> Self {
        self.trigger_interaction = mode;
        self
    }

    /// Check whether a collider passes this filter
    ///
    /// `global_hit_triggers` is the scene-wide default used when the
    /// interaction mode is [`TriggerInteraction::UseGlobal`].
    pub fn allows(&self, collider: &Collider, global_hit_triggers: bool) -> bool {
        if !self.layer_mask.intersects(collider.layers) {
            return false;
        }

        if collider.is_trigger {
            return match self.trigger_interaction {
                TriggerInteraction::UseGlobal => global_hit_triggers,
                TriggerInteraction::Collide => true,
                TriggerInteraction::Ignore => false,
            };
        }

        true
    }
}
