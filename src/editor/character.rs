//! Hero edit operations: `set_skill`, `set_level`, `resurrect`.

use crate::domain::hero::{xp_for_level, AliveState, Skill, NORMAL_LEVEL_CAP, MAX_SKILL};
use crate::domain::Hero;
use crate::editor::{EditResult, EditorError};
use crate::validator::Issue;

/// Fails `OutOfRange` if `value` is outside `[0, 300]`; otherwise sets the
/// skill.
pub fn set_skill(hero: &mut Hero, skill: Skill, value: i32) -> Result<EditResult, EditorError> {
    if !(0..=MAX_SKILL).contains(&value) {
        return Err(EditorError::OutOfRange {
            field: "skill",
            value,
            min: 0,
            max: MAX_SKILL,
        });
    }
    hero.skills.set(skill, value);
    Ok(EditResult::ok())
}

/// Fails `OutOfRange` if `level < 1`. `level > 62` succeeds with a
/// `HERO_LEVEL_002`-style warning in `validation_issues`. Experience is
/// always recomputed from the fixed curve.
pub fn set_level(hero: &mut Hero, level: i32) -> Result<EditResult, EditorError> {
    if level < 1 {
        return Err(EditorError::OutOfRange {
            field: "level",
            value: level,
            min: 1,
            max: i32::MAX,
        });
    }

    hero.level = level;
    hero.experience = xp_for_level(level);

    if level > NORMAL_LEVEL_CAP {
        let issue = Issue::warning(
            "HERO_LEVEL_002",
            format!("level {level} exceeds the normal cap of {NORMAL_LEVEL_CAP}"),
        )
        .with_path(hero.id.to_string());
        return Ok(EditResult::ok_with(vec![issue]));
    }

    Ok(EditResult::ok())
}

/// No-op unless `alive_state == Dead`; otherwise revives to `Active` at full
/// health.
pub fn resurrect(hero: &mut Hero) -> EditResult {
    if hero.alive_state != AliveState::Dead {
        return EditResult::ok();
    }
    hero.alive_state = AliveState::Active;
    hero.health = hero.max_health;
    EditResult::ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_level_recomputes_experience() {
        let mut hero = Hero::default();
        let result = set_level(&mut hero, 20).unwrap();
        assert!(result.success);
        assert_eq!(hero.level, 20);
        assert_eq!(hero.experience, 400_000);
    }

    #[test]
    fn set_level_above_cap_succeeds_with_a_warning() {
        let mut hero = Hero::default();
        let result = set_level(&mut hero, 70).unwrap();
        assert!(result.success);
        assert_eq!(result.validation_issues.len(), 1);
        assert_eq!(result.validation_issues[0].code, "HERO_LEVEL_002");
    }

    #[test]
    fn set_level_below_one_is_rejected() {
        let mut hero = Hero::default();
        assert!(set_level(&mut hero, 0).is_err());
    }

    #[test]
    fn resurrect_is_a_no_op_unless_dead() {
        let mut hero = Hero::default();
        hero.alive_state = AliveState::Fugitive;
        resurrect(&mut hero);
        assert_eq!(hero.alive_state, AliveState::Fugitive);

        hero.alive_state = AliveState::Dead;
        hero.max_health = 100;
        hero.health = 0;
        resurrect(&mut hero);
        assert_eq!(hero.alive_state, AliveState::Active);
        assert_eq!(hero.health, 100);
    }
}
