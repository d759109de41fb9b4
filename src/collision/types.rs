//! Collision categories and mask filtering.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Category bits a body belongs to (`collision_type`) or accepts (`collision_mask`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CollisionType: u32 {
        const NO_OBJECT = 0;
        const PLAYER_OBJECT = 1 << 0;
        const NPC_OBJECT = 1 << 1;
        const ENEMY_OBJECT = 1 << 2;
        const COLLECTABLE_OBJECT = 1 << 3;
        const ACTION_OBJECT = 1 << 4;
        const PROJECTILE_OBJECT = 1 << 5;
        /// Static level geometry.
        const WORLD_SHAPE = 1 << 6;
        /// First bit free for game-defined categories.
        const USER = 1 << 7;
        const ALL_OBJECT = u32::MAX;
    }
}

impl Default for CollisionType {
    fn default() -> Self {
        CollisionType::ENEMY_OBJECT
    }
}

impl CollisionType {
    /// True if each side's mask accepts the other's type.
    pub fn should_collide(type_a: Self, mask_a: Self, type_b: Self, mask_b: Self) -> bool {
        mask_a.intersects(type_b) && mask_b.intersects(type_a)
    }
}
