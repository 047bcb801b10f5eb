//! `HERO_*` rules.

use crate::domain::hero::{
    AliveState, MAX_PLAUSIBLE_AGE, MAX_SKILL, MIN_ADULT_AGE, NORMAL_ATTRIBUTE_CAP, NORMAL_LEVEL_CAP,
};
use crate::domain::Hero;
use crate::validator::{Entity, Issue, ValidationContext, Validator};
use crate::id::TypeTag;

/// Mod-authored perk ids are expected to carry a namespace prefix
/// (`"<mod-id>."`); anything without a dot and outside this built-in set is
/// flagged `HERO_PERK_001`.
const KNOWN_PERK_IDS: &[&str] = &[
    "eagle_eye",
    "execution_style",
    "old_blood",
    "path_finder",
    "quick_learner",
];

fn is_known_perk(perk_id: &str) -> bool {
    KNOWN_PERK_IDS.contains(&perk_id) || perk_id.contains('.')
}

fn check_hero(hero: &Hero, _ctx: &ValidationContext) -> Vec<Issue> {
    let mut issues = Vec::new();
    let path = hero.id.to_string();

    for (name, value) in hero.attributes.iter() {
        if value < 0 {
            issues.push(
                Issue::error("HERO_ATTR_001", format!("{name} is negative ({value})"))
                    .with_path(&path)
                    .with_context(value.to_string()),
            );
        }
    }

    for (skill, value) in hero.skills.iter() {
        if value < 0 {
            issues.push(
                Issue::error(
                    "HERO_SKILL_001",
                    format!("{skill:?} is negative ({value})"),
                )
                .with_path(&path)
                .with_context(value.to_string()),
            );
        } else if value > MAX_SKILL {
            issues.push(
                Issue::error(
                    "HERO_SKILL_002",
                    format!("{skill:?} exceeds the {MAX_SKILL} cap ({value})"),
                )
                .with_path(&path)
                .with_context(value.to_string()),
            );
        }
    }

    if hero.level < 1 {
        issues.push(
            Issue::error("HERO_LEVEL_001", format!("level {} is below 1", hero.level))
                .with_path(&path),
        );
    } else if hero.level > NORMAL_LEVEL_CAP {
        issues.push(
            Issue::warning(
                "HERO_LEVEL_002",
                format!("level {} exceeds the normal cap of {NORMAL_LEVEL_CAP}", hero.level),
            )
            .with_path(&path),
        );
    }

    if hero.gold < 0 {
        issues.push(
            Issue::error("HERO_GOLD_001", format!("gold is negative ({})", hero.gold))
                .with_path(&path),
        );
    }

    if hero.alive_state != AliveState::Dead && hero.age < MIN_ADULT_AGE {
        issues.push(
            Issue::warning(
                "HERO_AGE_001",
                format!("age {} is below the adult minimum of {MIN_ADULT_AGE}", hero.age),
            )
            .with_path(&path),
        );
    }
    if hero.age > MAX_PLAUSIBLE_AGE {
        issues.push(
            Issue::warning(
                "HERO_AGE_002",
                format!("age {} exceeds the plausible maximum of {MAX_PLAUSIBLE_AGE}", hero.age),
            )
            .with_path(&path),
        );
    }

    for perk in &hero.unlocked_perks {
        if !is_known_perk(perk) {
            issues.push(
                Issue::warning("HERO_PERK_001", format!("unrecognized perk id {perk:?}"))
                    .with_path(&path)
                    .with_context(perk.clone()),
            );
        }
    }

    issues
}

fn check_attribute_cap_strict(hero: &Hero, _ctx: &ValidationContext) -> Vec<Issue> {
    let path = hero.id.to_string();
    hero.attributes
        .iter()
        .filter(|(_, value)| *value > NORMAL_ATTRIBUTE_CAP)
        .map(|(name, value)| {
            Issue::warning(
                "HERO_ATTR_002",
                format!("{name} ({value}) exceeds the normal cap of {NORMAL_ATTRIBUTE_CAP}"),
            )
            .with_path(&path)
            .with_context(value.to_string())
        })
        .collect()
}

pub fn register(validator: &mut Validator) {
    validator.register(TypeTag::Hero, |entity, ctx| match entity {
        Entity::Hero(hero) => check_hero(hero, ctx),
        _ => Vec::new(),
    });
    validator.register_strict_only(TypeTag::Hero, |entity, ctx| match entity {
        Entity::Hero(hero) => check_attribute_cap_strict(hero, ctx),
        _ => Vec::new(),
    });
}
