//! The editor error taxonomy: argument out of range, capacity exceeded,
//! upgrade conflict, not-enough-troops. Never a source error — these are
//! domain-level rejections, not I/O failures.

use derive_more::derive::{Display, Error};

use crate::domain::ship::UpgradeCategory;

#[derive(Debug, Display, Error, PartialEq)]
pub enum EditorError {
    #[display("{field} is out of range: {value} (expected [{min},{max}])")]
    OutOfRange {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    #[display("upgrade category {category:?} conflicts with an existing upgrade")]
    Conflict { category: UpgradeCategory },
    #[display("adding this would bring cargo weight to {requested}, exceeding capacity {capacity}")]
    CapacityExceeded { requested: f32, capacity: f32 },
    #[display("no troop stack {troop_id:?} in this party")]
    NotEnoughTroops { troop_id: String },
}
