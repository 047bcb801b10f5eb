//! Small value types shared across entity modules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A flat 2-D campaign-map position.
pub type Position = Vec2;

/// A count paired with a per-item weight, tier, or similar — the common
/// shape behind troop stacks and cargo stacks.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct TroopStack {
    pub troop_id: String,
    pub troop_name: String,
    pub count: i32,
    pub wounded_count: i32,
    pub tier: i32,
    pub is_hero: bool,
    /// Back-reference to the [`Hero`](super::hero::Hero) this stack
    /// represents, if `is_hero` is set.
    pub hero_id: crate::id::EntityId,
}

impl TroopStack {
    /// Clamps `wounded_count` to `[0, count]`; a stack can't carry more
    /// wounded than it has troops.
    pub fn clamp_wounded(&mut self) {
        self.wounded_count = self.wounded_count.clamp(0, self.count.max(0));
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Color(pub u32);
