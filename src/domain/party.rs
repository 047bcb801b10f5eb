//! The `Party` entity: a mobile stack of troops on the campaign map, owned
//! by a hero and tracking its own morale, food, and wounded.

use serde::{Deserialize, Serialize};

use super::common::{Position, TroopStack};
use crate::id::EntityId;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PartyType {
    #[default]
    Lord,
    Caravan,
    Village,
    Garrison,
    Bandit,
    MinorFactionRaider,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum PartyState {
    #[default]
    Active,
    InSettlement,
    Besieging,
    InBattle,
    Disbanding,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Party {
    pub id: EntityId,
    pub name: String,
    pub party_type: PartyType,
    pub state: PartyState,
    pub gold: i32,
    pub food: i32,
    pub morale: i32,
    pub party_size_limit: i32,
    pub prisoner_limit: i32,
    pub troops: Vec<TroopStack>,
    pub prisoners: Vec<TroopStack>,
    pub leader_id: EntityId,
    pub current_settlement_id: EntityId,
    pub position: Position,
}

impl Default for Party {
    fn default() -> Party {
        Party {
            id: EntityId::EMPTY,
            name: String::new(),
            party_type: PartyType::default(),
            state: PartyState::default(),
            gold: 0,
            food: 0,
            morale: 100,
            party_size_limit: 1,
            prisoner_limit: 0,
            troops: Vec::new(),
            prisoners: Vec::new(),
            leader_id: EntityId::EMPTY,
            current_settlement_id: EntityId::EMPTY,
            position: Position::ZERO,
        }
    }
}

impl Party {
    /// Total rank-and-file troop count across all stacks (not prisoners).
    pub fn troop_count(&self) -> i32 {
        self.troops.iter().map(|t| t.count).sum()
    }
}
