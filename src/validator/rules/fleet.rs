//! `FLEET_*` rules. Only evaluated when the naval expansion's entities are
//! present; an unmutated non-naval save has no fleets to walk.

use crate::domain::Fleet;
use crate::id::TypeTag;
use crate::validator::{Entity, Issue, ValidationContext, Validator};

fn check_fleet(fleet: &Fleet, _ctx: &ValidationContext) -> Vec<Issue> {
    let mut issues = Vec::new();
    let path = fleet.id.to_string();

    if fleet.ships.is_empty() {
        issues.push(Issue::warning("FLEET_SHIPS_001", "fleet has no ships").with_path(&path));
    }

    if !fleet.has_valid_flagship() {
        issues.push(
            Issue::error(
                "FLEET_FLAG_001",
                format!("flagship {} is not a member of the fleet's ship list", fleet.flagship_id),
            )
            .with_path(&path)
            .with_context(fleet.flagship_id.to_string()),
        );
    }

    issues
}

pub fn register(validator: &mut Validator) {
    validator.register(TypeTag::Fleet, |entity, ctx| match entity {
        Entity::Fleet(fleet) => check_fleet(fleet, ctx),
        _ => Vec::new(),
    });
}
