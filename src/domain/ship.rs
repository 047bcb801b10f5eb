//! The `Ship` entity: a naval-expansion vessel with hull, crew, cargo, and
//! upgrade slots.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::id::EntityId;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum ShipClass {
    #[default]
    Standard,
    Flagship,
}

/// Fixed upgrade-category partition: a ship may carry at most one upgrade
/// per category, checked by `FleetEditor::add_upgrade`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum UpgradeCategory {
    Hull,
    Sails,
    Ram,
    Cargo,
    Crew,
    Combat,
    Navigation,
}

impl UpgradeCategory {
    pub const ALL: [UpgradeCategory; 7] = [
        UpgradeCategory::Hull,
        UpgradeCategory::Sails,
        UpgradeCategory::Ram,
        UpgradeCategory::Cargo,
        UpgradeCategory::Crew,
        UpgradeCategory::Combat,
        UpgradeCategory::Navigation,
    ];
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ShipUpgrade {
    pub id: String,
    pub name: String,
    pub category: UpgradeCategory,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CargoStack {
    pub item_id: String,
    pub item_name: String,
    pub count: i32,
    pub unit_weight: f32,
}

impl CargoStack {
    pub fn total_weight(&self) -> f32 {
        self.unit_weight * self.count as f32
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Weapon {
    pub id: String,
    pub name: String,
    pub damage: i32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Ship {
    pub id: EntityId,
    pub name: String,
    pub ship_type: String,
    pub class: ShipClass,
    pub current_hull: i32,
    pub max_hull: i32,
    pub crew_count: i32,
    pub crew_capacity: i32,
    pub crew_quality: i32,
    pub crew_morale: i32,
    pub cargo_capacity: f32,
    pub cargo: Vec<CargoStack>,
    pub weapons: Vec<Weapon>,
    pub upgrades: IndexSet<UpgradeCategory>,
    pub upgrade_details: Vec<ShipUpgrade>,
    pub fleet_id: EntityId,
}

impl Ship {
    pub fn cargo_weight(&self) -> f32 {
        self.cargo.iter().map(CargoStack::total_weight).sum()
    }
}

impl Default for Ship {
    fn default() -> Ship {
        Ship {
            id: EntityId::EMPTY,
            name: String::new(),
            ship_type: String::new(),
            class: ShipClass::default(),
            current_hull: 1,
            max_hull: 1,
            crew_count: 0,
            crew_capacity: 1,
            crew_quality: 0,
            crew_morale: 100,
            cargo_capacity: 0.0,
            cargo: Vec::new(),
            weapons: Vec::new(),
            upgrades: IndexSet::new(),
            upgrade_details: Vec::new(),
            fleet_id: EntityId::EMPTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cargo_weight_sums_stacks() {
        let mut ship = Ship::default();
        ship.cargo.push(CargoStack {
            item_id: "grain".into(),
            item_name: "Grain".into(),
            count: 10,
            unit_weight: 0.5,
        });
        ship.cargo.push(CargoStack {
            item_id: "iron".into(),
            item_name: "Iron".into(),
            count: 4,
            unit_weight: 2.0,
        });
        assert_eq!(ship.cargo_weight(), 13.0);
    }
}
