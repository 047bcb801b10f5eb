//! `CharacterTemplate`: a character preset exported for reuse across saves,
//! deliberately decoupled from any [`EntityId`](crate::id::EntityId) — it
//! outlives the save it was captured from.

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::hero::{Attributes, NavalSkills, Skills};

fn default_version() -> String {
    "2.0".to_owned()
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CharacterTemplate {
    pub name: String,
    pub attributes: Attributes,
    pub skills: Skills,
    pub naval_skills: Option<NavalSkills>,
    pub unlocked_perks: IndexSet<String>,
    pub appearance: Option<Vec<u8>>,
    pub exported_at: DateTime<Utc>,
    #[serde(default = "default_version")]
    pub version: String,
}

impl CharacterTemplate {
    pub fn new(name: impl Into<String>, exported_at: DateTime<Utc>) -> CharacterTemplate {
        CharacterTemplate {
            name: name.into(),
            attributes: Attributes::default(),
            skills: Skills::default(),
            naval_skills: None,
            unlocked_perks: IndexSet::new(),
            appearance: None,
            exported_at,
            version: default_version(),
        }
    }
}
