//! `PARTY_*` rules.

use crate::domain::Party;
use crate::id::TypeTag;
use crate::validator::{Entity, Issue, ValidationContext, Validator};

fn check_party(party: &Party, _ctx: &ValidationContext) -> Vec<Issue> {
    let mut issues = Vec::new();
    let path = party.id.to_string();

    for stack in party.troops.iter().chain(party.prisoners.iter()) {
        if stack.count < 0 {
            issues.push(
                Issue::error(
                    "PARTY_TROOP_001",
                    format!("{} has a negative count ({})", stack.troop_id, stack.count),
                )
                .with_path(&path)
                .with_context(stack.troop_id.clone()),
            );
        }
        if stack.wounded_count > stack.count {
            issues.push(
                Issue::error(
                    "PARTY_TROOP_002",
                    format!(
                        "{} has {} wounded exceeding its count of {}",
                        stack.troop_id, stack.wounded_count, stack.count
                    ),
                )
                .with_path(&path)
                .with_context(stack.troop_id.clone()),
            );
        }
    }

    if party.gold < 0 {
        issues.push(
            Issue::error("PARTY_GOLD_001", format!("gold is negative ({})", party.gold))
                .with_path(&path),
        );
    }
    if party.food < 0 {
        issues.push(
            Issue::error("PARTY_FOOD_001", format!("food is negative ({})", party.food))
                .with_path(&path),
        );
    }

    if !(0..=100).contains(&party.morale) {
        issues.push(
            Issue::warning(
                "PARTY_MORALE_001",
                format!("morale {} is outside [0,100]", party.morale),
            )
            .with_path(&path),
        );
    }

    issues
}

pub fn register(validator: &mut Validator) {
    validator.register(TypeTag::Party, |entity, ctx| match entity {
        Entity::Party(party) => check_party(party, ctx),
        _ => Vec::new(),
    });
}
