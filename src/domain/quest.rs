//! The `Quest` entity: minimal by design, since quest data is the most
//! mod-defined surface in the graph.

use serde::{Deserialize, Serialize};

use crate::id::EntityId;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum QuestState {
    #[default]
    Active,
    Completed,
    Failed,
    Cancelled,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Quest {
    pub id: EntityId,
    pub string_id: String,
    pub title: String,
    pub giver_id: EntityId,
    pub state: QuestState,
    /// Mod-defined quest state, carried through verbatim rather than
    /// decoded into named fields.
    pub data: Vec<u8>,
}

impl Default for Quest {
    fn default() -> Quest {
        Quest {
            id: EntityId::EMPTY,
            string_id: String::new(),
            title: String::new(),
            giver_id: EntityId::EMPTY,
            state: QuestState::default(),
            data: Vec::new(),
        }
    }
}
