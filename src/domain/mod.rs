//! The in-memory domain graph: entity types, the [`Save`] that owns them,
//! and small value types shared across entities.

pub mod common;
pub mod fleet;
pub mod hero;
pub mod party;
pub mod political;
pub mod quest;
pub mod save;
pub mod ship;
pub mod template;

pub use fleet::Fleet;
pub use hero::Hero;
pub use party::Party;
pub use political::{Clan, Faction, Kingdom, Settlement};
pub use quest::Quest;
pub use save::{Header, Metadata, ModuleRef, PreservedSegment, Save};
pub use ship::Ship;
pub use template::CharacterTemplate;
