//! Settlement, Clan, Kingdom, and Faction entities: mostly name/color/
//! reference bags with no interesting invariants of their own beyond
//! referential integrity, which the validator's `REF_00x` rules cover
//! generically.

use serde::{Deserialize, Serialize};

use super::common::{Color, Position};
use crate::id::EntityId;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum SettlementType {
    #[default]
    Town,
    Castle,
    Village,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Settlement {
    pub id: EntityId,
    pub name: String,
    pub color: Color,
    pub settlement_type: SettlementType,
    pub prosperity: i32,
    pub owner_clan_id: EntityId,
    pub kingdom_id: EntityId,
    pub position: Position,
}

impl Default for Settlement {
    fn default() -> Settlement {
        Settlement {
            id: EntityId::EMPTY,
            name: String::new(),
            color: Color::default(),
            settlement_type: SettlementType::default(),
            prosperity: 0,
            owner_clan_id: EntityId::EMPTY,
            kingdom_id: EntityId::EMPTY,
            position: Position::ZERO,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Clan {
    pub id: EntityId,
    pub name: String,
    pub color: Color,
    pub leader_id: EntityId,
    pub influence: i32,
    pub gold: i32,
    pub kingdom_id: EntityId,
    pub settlements: Vec<EntityId>,
    pub is_eliminated: bool,
}

impl Default for Clan {
    fn default() -> Clan {
        Clan {
            id: EntityId::EMPTY,
            name: String::new(),
            color: Color::default(),
            leader_id: EntityId::EMPTY,
            influence: 0,
            gold: 0,
            kingdom_id: EntityId::EMPTY,
            settlements: Vec::new(),
            is_eliminated: false,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Kingdom {
    pub id: EntityId,
    pub name: String,
    pub color: Color,
    pub ruler_clan_id: EntityId,
    pub clans: Vec<EntityId>,
    pub is_eliminated: bool,
}

impl Default for Kingdom {
    fn default() -> Kingdom {
        Kingdom {
            id: EntityId::EMPTY,
            name: String::new(),
            color: Color::default(),
            ruler_clan_id: EntityId::EMPTY,
            clans: Vec::new(),
            is_eliminated: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum FactionKind {
    #[default]
    Kingdom,
    Bandit,
    Neutral,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Faction {
    pub id: EntityId,
    pub name: String,
    pub color: Color,
    pub kind: FactionKind,
}

impl Default for Faction {
    fn default() -> Faction {
        Faction {
            id: EntityId::EMPTY,
            name: String::new(),
            color: Color::default(),
            kind: FactionKind::default(),
        }
    }
}
