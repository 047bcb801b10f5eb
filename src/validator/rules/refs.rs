//! `REF_00x`: dangling-reference checks. Always warnings, never errors — a
//! reference to a not-yet-loaded or since-removed entity shouldn't block a
//! save from opening.

use crate::domain::{Hero, Party};
use crate::validator::{Entity, Issue, ValidationContext};

pub fn hero_refs(entity: &Entity, ctx: &ValidationContext) -> Vec<Issue> {
    let Entity::Hero(hero) = entity else {
        return Vec::new();
    };
    check_hero_refs(hero, ctx)
}

fn check_hero_refs(hero: &Hero, ctx: &ValidationContext) -> Vec<Issue> {
    let mut issues = Vec::new();
    let path = hero.id.to_string();

    if !ctx.exists(hero.clan_id) {
        issues.push(
            Issue::warning("REF_001", format!("clan {} does not exist", hero.clan_id))
                .with_path(&path)
                .with_context(hero.clan_id.to_string()),
        );
    }
    if !ctx.exists(hero.party_id) {
        issues.push(
            Issue::warning("REF_002", format!("party {} does not exist", hero.party_id))
                .with_path(&path)
                .with_context(hero.party_id.to_string()),
        );
    }

    issues
}

pub fn party_refs(entity: &Entity, ctx: &ValidationContext) -> Vec<Issue> {
    let Entity::Party(party) = entity else {
        return Vec::new();
    };
    check_party_refs(party, ctx)
}

fn check_party_refs(party: &Party, ctx: &ValidationContext) -> Vec<Issue> {
    let mut issues = Vec::new();

    if !ctx.exists(party.leader_id) {
        issues.push(
            Issue::warning("REF_003", format!("leader {} does not exist", party.leader_id))
                .with_path(party.id.to_string())
                .with_context(party.leader_id.to_string()),
        );
    }

    issues
}
