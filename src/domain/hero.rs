//! The `Hero` entity: playable and non-playable characters, their
//! attributes, skills, and affiliations.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// Normal level cap; levels above this are a warning (`HERO_LEVEL_002`), not
/// an error.
pub const NORMAL_LEVEL_CAP: i32 = 62;

/// Skill and attribute values are bounded `[0, MAX_SKILL]`.
pub const MAX_SKILL: i32 = 300;

/// Attributes above this are unusual but not invalid; flagged only under
/// `ValidationMode::Strict` (`HERO_ATTR_002`).
pub const NORMAL_ATTRIBUTE_CAP: i32 = 10;

/// Ages below this for a living hero, or above this for any hero, are
/// unusual but not invalid (`HERO_AGE_001`/`HERO_AGE_002`).
pub const MIN_ADULT_AGE: i32 = 18;
pub const MAX_PLAUSIBLE_AGE: i32 = 100;

/// `xp(level) = level * level * 1000`.
///
/// Used by `CharacterEditor::set_level` to back-fill `experience` whenever a
/// level is set directly, and by the leveling tests below.
pub fn xp_for_level(level: i32) -> i32 {
    level.saturating_mul(level).saturating_mul(1000)
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum AliveState {
    #[default]
    Active,
    Fugitive,
    Prisoner,
    Disabled,
    Dead,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Attributes {
    pub vigor: i32,
    pub control: i32,
    pub endurance: i32,
    pub cunning: i32,
    pub social: i32,
    pub intelligence: i32,
}

impl Attributes {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i32)> {
        [
            ("Vigor", self.vigor),
            ("Control", self.control),
            ("Endurance", self.endurance),
            ("Cunning", self.cunning),
            ("Social", self.social),
            ("Intelligence", self.intelligence),
        ]
        .into_iter()
    }
}

/// One slot per named skill. The 18 skills mirror the game's canonical skill
/// list; each is bounded `[0, 300]`.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Skills {
    pub one_handed: i32,
    pub two_handed: i32,
    pub polearm: i32,
    pub bow: i32,
    pub crossbow: i32,
    pub throwing: i32,
    pub riding: i32,
    pub athletics: i32,
    pub smithing: i32,
    pub scouting: i32,
    pub tactics: i32,
    pub roguery: i32,
    pub charm: i32,
    pub leadership: i32,
    pub trade: i32,
    pub steward: i32,
    pub medicine: i32,
    pub engineering: i32,
}

impl Skills {
    pub fn iter(&self) -> impl Iterator<Item = (Skill, i32)> {
        Skill::ALL.into_iter().map(|s| (s, self.get(s)))
    }

    pub fn get(&self, skill: Skill) -> i32 {
        match skill {
            Skill::OneHanded => self.one_handed,
            Skill::TwoHanded => self.two_handed,
            Skill::Polearm => self.polearm,
            Skill::Bow => self.bow,
            Skill::Crossbow => self.crossbow,
            Skill::Throwing => self.throwing,
            Skill::Riding => self.riding,
            Skill::Athletics => self.athletics,
            Skill::Smithing => self.smithing,
            Skill::Scouting => self.scouting,
            Skill::Tactics => self.tactics,
            Skill::Roguery => self.roguery,
            Skill::Charm => self.charm,
            Skill::Leadership => self.leadership,
            Skill::Trade => self.trade,
            Skill::Steward => self.steward,
            Skill::Medicine => self.medicine,
            Skill::Engineering => self.engineering,
        }
    }

    pub fn set(&mut self, skill: Skill, value: i32) {
        match skill {
            Skill::OneHanded => self.one_handed = value,
            Skill::TwoHanded => self.two_handed = value,
            Skill::Polearm => self.polearm = value,
            Skill::Bow => self.bow = value,
            Skill::Crossbow => self.crossbow = value,
            Skill::Throwing => self.throwing = value,
            Skill::Riding => self.riding = value,
            Skill::Athletics => self.athletics = value,
            Skill::Smithing => self.smithing = value,
            Skill::Scouting => self.scouting = value,
            Skill::Tactics => self.tactics = value,
            Skill::Roguery => self.roguery = value,
            Skill::Charm => self.charm = value,
            Skill::Leadership => self.leadership = value,
            Skill::Trade => self.trade = value,
            Skill::Steward => self.steward = value,
            Skill::Medicine => self.medicine = value,
            Skill::Engineering => self.engineering = value,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub enum Skill {
    OneHanded,
    TwoHanded,
    Polearm,
    Bow,
    Crossbow,
    Throwing,
    Riding,
    Athletics,
    Smithing,
    Scouting,
    Tactics,
    Roguery,
    Charm,
    Leadership,
    Trade,
    Steward,
    Medicine,
    Engineering,
}

impl Skill {
    pub const ALL: [Skill; 18] = [
        Skill::OneHanded,
        Skill::TwoHanded,
        Skill::Polearm,
        Skill::Bow,
        Skill::Crossbow,
        Skill::Throwing,
        Skill::Riding,
        Skill::Athletics,
        Skill::Smithing,
        Skill::Scouting,
        Skill::Tactics,
        Skill::Roguery,
        Skill::Charm,
        Skill::Leadership,
        Skill::Trade,
        Skill::Steward,
        Skill::Medicine,
        Skill::Engineering,
    ];
}

/// The optional naval-expansion skill vector, present only on saves loaded
/// with the naval expansion installed, bounded the same way as [`Skills`].
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct NavalSkills {
    pub navigation: i32,
    pub naval_tactics: i32,
    pub naval_stewardship: i32,
}

impl NavalSkills {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i32)> {
        [
            ("Navigation", self.navigation),
            ("NavalTactics", self.naval_tactics),
            ("NavalStewardship", self.naval_stewardship),
        ]
        .into_iter()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Hero {
    pub id: EntityId,
    pub string_id: String,
    pub name: String,
    pub gender: Gender,
    pub age: i32,
    pub is_main_hero: bool,
    pub alive_state: AliveState,
    pub level: i32,
    pub experience: i32,
    pub gold: i32,
    pub health: i32,
    pub max_health: i32,
    pub attributes: Attributes,
    pub skills: Skills,
    pub naval_skills: Option<NavalSkills>,
    pub unlocked_perks: IndexSet<String>,
    /// Opaque body-morph/appearance blob, carried through verbatim rather
    /// than decoded into named fields.
    pub appearance: Option<Vec<u8>>,
    pub clan_id: EntityId,
    pub party_id: EntityId,
    pub fleet_id: EntityId,
}

impl Default for Hero {
    fn default() -> Hero {
        Hero {
            id: EntityId::EMPTY,
            string_id: String::new(),
            name: String::new(),
            gender: Gender::default(),
            age: 18,
            is_main_hero: false,
            alive_state: AliveState::default(),
            level: 1,
            experience: 0,
            gold: 0,
            health: 1,
            max_health: 1,
            attributes: Attributes::default(),
            skills: Skills::default(),
            naval_skills: None,
            unlocked_perks: IndexSet::new(),
            appearance: None,
            clan_id: EntityId::EMPTY,
            party_id: EntityId::EMPTY,
            fleet_id: EntityId::EMPTY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn xp_curve_matches_design_constant() {
        assert_eq!(xp_for_level(20), 400_000);
        assert_eq!(xp_for_level(1), 1000);
    }

    #[test]
    fn skills_get_set_round_trip_every_slot() {
        let mut skills = Skills::default();
        for (i, skill) in Skill::ALL.into_iter().enumerate() {
            skills.set(skill, i as i32);
        }
        for (i, skill) in Skill::ALL.into_iter().enumerate() {
            assert_eq!(skills.get(skill), i as i32);
        }
    }
}
