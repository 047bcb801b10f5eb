//! Fleet and ship edit operations: `add_ship`, `remove_ship`, `add_upgrade`,
//! `add_cargo`, `repair`.

use crate::domain::ship::{CargoStack, ShipUpgrade};
use crate::domain::{Fleet, Ship};
use crate::editor::{EditResult, EditorError};
use crate::id::EntityId;

/// Idempotent: a ship already in the fleet is left untouched. The first
/// ship ever added becomes the flagship.
pub fn add_ship(fleet: &mut Fleet, ship: &mut Ship) -> EditResult {
    if fleet.ships.contains(&ship.id) {
        return EditResult::ok();
    }

    fleet.ships.push(ship.id);
    ship.fleet_id = fleet.id;

    if fleet.flagship_id.is_empty() {
        fleet.flagship_id = ship.id;
    }

    EditResult::ok()
}

/// Removes `ship` from the fleet. If it was the flagship, the next ship
/// (by insertion order) is promoted, or the fleet is left flagshipless.
pub fn remove_ship(fleet: &mut Fleet, ship: &mut Ship) -> EditResult {
    fleet.ships.retain(|&id| id != ship.id);
    ship.fleet_id = EntityId::EMPTY;

    if fleet.flagship_id == ship.id {
        fleet.flagship_id = fleet.ships.first().copied().unwrap_or(EntityId::EMPTY);
    }

    EditResult::ok()
}

/// Fails `Conflict` if the ship already carries an upgrade in this
/// category; each [`UpgradeCategory`](crate::domain::ship::UpgradeCategory)
/// admits at most one upgrade at a time.
pub fn add_upgrade(ship: &mut Ship, upgrade: ShipUpgrade) -> Result<EditResult, EditorError> {
    if ship.upgrades.contains(&upgrade.category) {
        return Err(EditorError::Conflict {
            category: upgrade.category,
        });
    }
    ship.upgrades.insert(upgrade.category);
    ship.upgrade_details.push(upgrade);
    Ok(EditResult::ok())
}

/// Fails `CapacityExceeded` if adding `item` would push total cargo weight
/// past `ship.cargo_capacity`; otherwise merges into the matching stack by
/// `item_id`, or appends a new one.
pub fn add_cargo(ship: &mut Ship, item: CargoStack) -> Result<EditResult, EditorError> {
    let requested = ship.cargo_weight() + item.total_weight();
    if requested > ship.cargo_capacity {
        return Err(EditorError::CapacityExceeded {
            requested,
            capacity: ship.cargo_capacity,
        });
    }

    match ship.cargo.iter_mut().find(|s| s.item_id == item.item_id) {
        Some(stack) => stack.count += item.count,
        None => ship.cargo.push(item),
    }

    Ok(EditResult::ok())
}

/// Restores `current_hull` to `max_hull`. Always succeeds; idempotent.
pub fn repair(ship: &mut Ship) -> EditResult {
    ship.current_hull = ship.max_hull;
    EditResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TypeTag;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_ship_sets_the_first_ship_as_flagship() {
        let mut fleet = Fleet::default();
        fleet.id = EntityId::new(TypeTag::Fleet, 1);
        let mut ship = Ship::default();
        ship.id = EntityId::new(TypeTag::Ship, 1);

        add_ship(&mut fleet, &mut ship);

        assert_eq!(fleet.ships, vec![ship.id]);
        assert_eq!(fleet.flagship_id, ship.id);
        assert_eq!(ship.fleet_id, fleet.id);
    }

    #[test]
    fn add_ship_is_idempotent() {
        let mut fleet = Fleet::default();
        let mut ship = Ship::default();
        ship.id = EntityId::new(TypeTag::Ship, 1);

        add_ship(&mut fleet, &mut ship);
        add_ship(&mut fleet, &mut ship);

        assert_eq!(fleet.ships.len(), 1);
    }

    #[test]
    fn remove_ship_promotes_the_next_flagship() {
        let mut fleet = Fleet::default();
        let mut ship_a = Ship::default();
        ship_a.id = EntityId::new(TypeTag::Ship, 1);
        let mut ship_b = Ship::default();
        ship_b.id = EntityId::new(TypeTag::Ship, 2);

        add_ship(&mut fleet, &mut ship_a);
        add_ship(&mut fleet, &mut ship_b);
        remove_ship(&mut fleet, &mut ship_a);

        assert_eq!(fleet.flagship_id, ship_b.id);
        assert_eq!(ship_a.fleet_id, EntityId::EMPTY);
    }

    #[test]
    fn add_upgrade_rejects_a_second_upgrade_in_the_same_category() {
        let mut ship = Ship::default();
        let hull_a = ShipUpgrade {
            id: "reinforced_hull".into(),
            name: "Reinforced Hull".into(),
            category: crate::domain::ship::UpgradeCategory::Hull,
        };
        let hull_b = ShipUpgrade {
            id: "ironclad_hull".into(),
            name: "Ironclad Hull".into(),
            category: crate::domain::ship::UpgradeCategory::Hull,
        };

        add_upgrade(&mut ship, hull_a).unwrap();
        let err = add_upgrade(&mut ship, hull_b).unwrap_err();
        assert_eq!(
            err,
            EditorError::Conflict {
                category: crate::domain::ship::UpgradeCategory::Hull
            }
        );
    }

    #[test]
    fn add_cargo_rejects_over_capacity() {
        let mut ship = Ship::default();
        ship.cargo_capacity = 10.0;
        let grain = CargoStack {
            item_id: "grain".into(),
            item_name: "Grain".into(),
            count: 30,
            unit_weight: 1.0,
        };
        assert!(add_cargo(&mut ship, grain).is_err());
    }

    #[test]
    fn repair_restores_full_hull() {
        let mut ship = Ship::default();
        ship.max_hull = 200;
        ship.current_hull = 40;
        repair(&mut ship);
        assert_eq!(ship.current_hull, 200);
    }
}
