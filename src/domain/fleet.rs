//! The `Fleet` entity: a naval-expansion grouping of ships under an admiral,
//! with its own morale, supplies, and formation.

use serde::{Deserialize, Serialize};

use super::common::Position;
use crate::id::EntityId;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum FleetState {
    #[default]
    Sailing,
    Docked,
    Blockading,
    InNavalBattle,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Formation {
    #[default]
    Line,
    Wedge,
    Column,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Fleet {
    pub id: EntityId,
    pub name: String,
    pub admiral_id: EntityId,
    pub clan_id: EntityId,
    pub state: FleetState,
    pub formation: Formation,
    pub morale: i32,
    pub gold: i32,
    pub food_supplies: i32,
    pub position: Position,
    pub heading: f32,
    pub ships: Vec<EntityId>,
    /// Must reference a member of `ships` (`FLEET_FLAG_001`, hard error —
    /// unlike the otherwise-warning-only dangling-reference rules, a fleet
    /// with no flagship among its own ships can't take orders).
    pub flagship_id: EntityId,
}

impl Default for Fleet {
    fn default() -> Fleet {
        Fleet {
            id: EntityId::EMPTY,
            name: String::new(),
            admiral_id: EntityId::EMPTY,
            clan_id: EntityId::EMPTY,
            state: FleetState::default(),
            formation: Formation::default(),
            morale: 100,
            gold: 0,
            food_supplies: 0,
            position: Position::ZERO,
            heading: 0.0,
            ships: Vec::new(),
            flagship_id: EntityId::EMPTY,
        }
    }
}

impl Fleet {
    /// `flagship_id` is either unset or a member of `ships`. An unset
    /// flagship (`EntityId::EMPTY`) is valid — the fleet simply has none yet.
    pub fn has_valid_flagship(&self) -> bool {
        self.flagship_id.is_empty() || self.ships.contains(&self.flagship_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::id::TypeTag;

    #[test]
    fn flagship_must_be_a_member_ship() {
        let mut fleet = Fleet::default();
        let ship_a = EntityId::new(TypeTag::Ship, 1);
        let ship_b = EntityId::new(TypeTag::Ship, 2);
        fleet.ships.push(ship_a);
        fleet.flagship_id = ship_b;
        assert!(!fleet.has_valid_flagship());

        fleet.flagship_id = ship_a;
        assert!(fleet.has_valid_flagship());
    }
}
