//! `SHIP_*` rules.

use crate::domain::Ship;
use crate::id::TypeTag;
use crate::validator::{Entity, Issue, ValidationContext, Validator};

fn check_ship(ship: &Ship, _ctx: &ValidationContext) -> Vec<Issue> {
    let mut issues = Vec::new();
    let path = ship.id.to_string();

    if ship.current_hull < 0 {
        issues.push(
            Issue::error(
                "SHIP_HULL_001",
                format!("current hull is negative ({})", ship.current_hull),
            )
            .with_path(&path),
        );
    } else if ship.current_hull > ship.max_hull {
        issues.push(
            Issue::error(
                "SHIP_HULL_002",
                format!(
                    "current hull ({}) exceeds max hull ({})",
                    ship.current_hull, ship.max_hull
                ),
            )
            .with_path(&path),
        );
    }

    if ship.crew_count < 0 {
        issues.push(
            Issue::error(
                "SHIP_CREW_001",
                format!("crew count is negative ({})", ship.crew_count),
            )
            .with_path(&path),
        );
    } else if ship.crew_count > ship.crew_capacity {
        issues.push(
            Issue::error(
                "SHIP_CREW_002",
                format!(
                    "crew count ({}) exceeds crew capacity ({})",
                    ship.crew_count, ship.crew_capacity
                ),
            )
            .with_path(&path),
        );
    }

    let cargo_weight = ship.cargo_weight();
    if cargo_weight > ship.cargo_capacity {
        issues.push(
            Issue::error(
                "SHIP_CARGO_001",
                format!(
                    "aggregate cargo weight ({cargo_weight}) exceeds capacity ({})",
                    ship.cargo_capacity
                ),
            )
            .with_path(&path)
            .with_context(cargo_weight.to_string()),
        );
    }

    if !(0..=100).contains(&ship.crew_morale) {
        issues.push(
            Issue::warning(
                "SHIP_MORALE_001",
                format!("crew morale {} is outside [0,100]", ship.crew_morale),
            )
            .with_path(&path),
        );
    }

    issues
}

pub fn register(validator: &mut Validator) {
    validator.register(TypeTag::Ship, |entity, ctx| match entity {
        Entity::Ship(ship) => check_ship(ship, ctx),
        _ => Vec::new(),
    });
}
