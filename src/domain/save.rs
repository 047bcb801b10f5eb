//! The [`Save`] graph: the in-memory owner of every entity loaded from, or
//! destined for, one save file.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{
    fleet::Fleet,
    hero::Hero,
    party::Party,
    political::{Clan, Faction, Kingdom, Settlement},
    quest::Quest,
    ship::Ship,
};
use crate::id::{EntityId, IdGenerator, TypeTag};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ModuleRef {
    pub id: String,
    pub version: String,
    pub is_official: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Header {
    pub header_version: i32,
    pub game_version: String,
    pub modules: Vec<ModuleRef>,
}

impl Header {
    /// Installed module ids, lowercased comparisons left to the caller.
    pub fn module_ids(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.id.as_str())
    }
}

/// Recognized metadata fields; unrecognized keys in the source JSON are
/// tolerated and ignored by the codec, never rejected.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Metadata {
    pub character_name: String,
    pub main_hero_level: i32,
    pub day: i32,
    pub play_time: i64,
    pub clan_name: String,
    pub gold: i32,
}

/// A segment the codec does not recognize, preserved verbatim so an
/// unmutated save re-encodes byte-identical.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PreservedSegment {
    pub tag: u16,
    pub bytes: Vec<u8>,
}

/// Owns every entity loaded from one save file. Entities reference each
/// other only by [`EntityId`]; dereferencing is always a lookup through this
/// struct's per-type maps, never a direct pointer.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Save {
    pub header: Header,
    pub metadata: Metadata,
    /// Raw campaign clock, decoded from segment tag `0x0001`.
    pub campaign_time_ticks: i64,
    pub heroes: IndexMap<EntityId, Hero>,
    pub parties: IndexMap<EntityId, Party>,
    pub clans: IndexMap<EntityId, Clan>,
    pub kingdoms: IndexMap<EntityId, Kingdom>,
    pub settlements: IndexMap<EntityId, Settlement>,
    pub factions: IndexMap<EntityId, Faction>,
    pub fleets: IndexMap<EntityId, Fleet>,
    pub ships: IndexMap<EntityId, Ship>,
    pub quests: IndexMap<EntityId, Quest>,
    pub preserved_segments: Vec<PreservedSegment>,
    /// Decompressed body bytes, retained only when `LoadOptions::keep_raw_body`
    /// is set.
    #[serde(skip)]
    pub raw_body: Option<Vec<u8>>,
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub id_generator: IdGenerator,
}

impl Save {
    pub fn new() -> Save {
        Save::default()
    }

    /// Allocates a fresh id for a newly created entity of `tag`. Ids read
    /// from a save never pass through this.
    pub fn allocate_id(&self, tag: TypeTag) -> EntityId {
        self.id_generator.next(tag)
    }

    /// Whether any installed module id matches a configured naval-expansion
    /// identifier. The id list comes from the caller's config rather than
    /// being hardcoded, since which mods count as "the naval expansion" is
    /// a deployment choice, not a constant of the save format.
    pub fn has_naval_expansion(&self, naval_expansion_module_ids: &[String]) -> bool {
        self.header.module_ids().any(|installed| {
            naval_expansion_module_ids
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(installed))
        })
    }

    pub fn resolve_hero(&self, id: EntityId) -> Option<&Hero> {
        if id.is_empty() {
            return None;
        }
        self.heroes.get(&id)
    }

    pub fn resolve_party(&self, id: EntityId) -> Option<&Party> {
        if id.is_empty() {
            return None;
        }
        self.parties.get(&id)
    }

    pub fn resolve_fleet(&self, id: EntityId) -> Option<&Fleet> {
        if id.is_empty() {
            return None;
        }
        self.fleets.get(&id)
    }

    pub fn resolve_ship(&self, id: EntityId) -> Option<&Ship> {
        if id.is_empty() {
            return None;
        }
        self.ships.get(&id)
    }

    /// Removes a fleet, clearing its ships' back-references but leaving the
    /// ships themselves owned by the graph; a ship without a fleet is a
    /// valid, ordinary state, not an orphan that needs sweeping.
    pub fn remove_fleet(&mut self, id: EntityId) -> Option<Fleet> {
        let fleet = self.fleets.shift_remove(&id)?;
        for ship_id in &fleet.ships {
            if let Some(ship) = self.ships.get_mut(ship_id) {
                ship.fleet_id = EntityId::EMPTY;
            }
        }
        Some(fleet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn has_naval_expansion_is_case_insensitive() {
        let mut save = Save::new();
        save.header.modules.push(ModuleRef {
            id: "WarSails".to_owned(),
            version: "1.0".to_owned(),
            is_official: false,
        });
        assert!(save.has_naval_expansion(&["warsails".to_owned()]));
        assert!(!save.has_naval_expansion(&["othermod".to_owned()]));
    }

    #[test]
    fn removing_a_fleet_clears_ship_back_references_not_the_ships() {
        let mut save = Save::new();
        let fleet_id = save.allocate_id(TypeTag::Fleet);
        let ship_id = save.allocate_id(TypeTag::Ship);
        let mut ship = Ship::default();
        ship.id = ship_id;
        ship.fleet_id = fleet_id;
        save.ships.insert(ship_id, ship);

        let mut fleet = Fleet::default();
        fleet.id = fleet_id;
        fleet.ships.push(ship_id);
        save.fleets.insert(fleet_id, fleet);

        save.remove_fleet(fleet_id);
        assert!(save.fleets.get(&fleet_id).is_none());
        assert!(save.ships.get(&ship_id).is_some());
        assert_eq!(save.ships[&ship_id].fleet_id, EntityId::EMPTY);
    }
}
