//! Party edit operations: `add_troops`, `remove_troops`, `set_morale`,
//! `teleport_to`.

use crate::domain::common::TroopStack;
use crate::domain::party::PartyState;
use crate::domain::{Party, Settlement};
use crate::editor::{EditResult, EditorError};
use crate::id::EntityId;

/// Fails `OutOfRange` if `count <= 0`; otherwise merges into the existing
/// stack matched by `troop_id`, or appends a new one.
pub fn add_troops(
    party: &mut Party,
    troop_id: &str,
    troop_name: &str,
    count: i32,
    tier: i32,
) -> Result<EditResult, EditorError> {
    if count <= 0 {
        return Err(EditorError::OutOfRange {
            field: "count",
            value: count,
            min: 1,
            max: i32::MAX,
        });
    }

    match party.troops.iter_mut().find(|s| s.troop_id == troop_id) {
        Some(stack) => stack.count += count,
        None => party.troops.push(TroopStack {
            troop_id: troop_id.to_owned(),
            troop_name: troop_name.to_owned(),
            count,
            wounded_count: 0,
            tier,
            is_hero: false,
            hero_id: EntityId::EMPTY,
        }),
    }

    Ok(EditResult::ok())
}

/// Removes `min(n, stack.count)` from the stack matched by `troop_id`; when
/// `n` is absent, removes the whole stack. Dropping a stack to 0 removes it
/// entirely. Fails `NotEnoughTroops` if no stack matches.
pub fn remove_troops(
    party: &mut Party,
    troop_id: &str,
    n: Option<i32>,
) -> Result<EditResult, EditorError> {
    let index = party
        .troops
        .iter()
        .position(|s| s.troop_id == troop_id)
        .ok_or_else(|| EditorError::NotEnoughTroops {
            troop_id: troop_id.to_owned(),
        })?;

    let stack = &mut party.troops[index];
    let removed = n.unwrap_or(stack.count).min(stack.count).max(0);
    stack.count -= removed;
    stack.clamp_wounded();

    if stack.count == 0 {
        party.troops.remove(index);
    }

    Ok(EditResult::ok())
}

/// Clamps `morale` to `[0,100]` and applies it; never fails.
pub fn set_morale(party: &mut Party, morale: i32) -> EditResult {
    party.morale = morale.clamp(0, 100);
    EditResult::ok()
}

/// Moves `party` to `settlement`'s position, sets `current_settlement_id`,
/// and marks the party `InSettlement`.
pub fn teleport_to(party: &mut Party, settlement: &Settlement) -> EditResult {
    party.position = settlement.position;
    party.current_settlement_id = settlement.id;
    party.state = PartyState::InSettlement;
    EditResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn add_troops_merges_matching_stacks() {
        let mut party = Party::default();
        add_troops(&mut party, "imperial_infantry", "Imperial Infantry", 10, 2).unwrap();
        add_troops(&mut party, "imperial_infantry", "Imperial Infantry", 5, 2).unwrap();
        assert_eq!(party.troops.len(), 1);
        assert_eq!(party.troops[0].count, 15);
    }

    #[test]
    fn remove_troops_drops_the_stack_at_zero() {
        let mut party = Party::default();
        add_troops(&mut party, "imperial_infantry", "Imperial Infantry", 10, 2).unwrap();
        remove_troops(&mut party, "imperial_infantry", None).unwrap();
        assert!(party.troops.is_empty());
    }

    #[test]
    fn remove_troops_clamps_wounded_after_removal() {
        let mut party = Party::default();
        add_troops(&mut party, "imperial_infantry", "Imperial Infantry", 10, 2).unwrap();
        party.troops[0].wounded_count = 8;
        remove_troops(&mut party, "imperial_infantry", Some(5)).unwrap();
        assert_eq!(party.troops[0].count, 5);
        assert_eq!(party.troops[0].wounded_count, 5);
    }

    #[test]
    fn set_morale_clamps_to_bounds() {
        let mut party = Party::default();
        set_morale(&mut party, 500);
        assert_eq!(party.morale, 100);
        set_morale(&mut party, -5);
        assert_eq!(party.morale, 0);
    }
}
