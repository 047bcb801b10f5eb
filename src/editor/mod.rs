//! Thin, pure mutators over graph slices. Editors never touch disk and
//! never perform cross-entity invariant checks — that's the validator's
//! job; editors only enforce the bound on the single value they're setting,
//! returning [`EditorError`] for anything outside it.

pub mod character;
pub mod error;
pub mod fleet;
pub mod party;

pub use error::EditorError;

use crate::validator::Issue;

/// The typed outcome every editor operation returns. `validation_issues`
/// carries in-range-but-unusual warnings the editor noticed inline (e.g.
/// setting a hero past the normal level cap); it is not a substitute for
/// running the validator over the whole save.
#[derive(Debug, Default)]
pub struct EditResult {
    pub success: bool,
    pub validation_issues: Vec<Issue>,
}

impl EditResult {
    pub(crate) fn ok() -> EditResult {
        EditResult {
            success: true,
            validation_issues: Vec::new(),
        }
    }

    pub(crate) fn ok_with(issues: Vec<Issue>) -> EditResult {
        EditResult {
            success: true,
            validation_issues: issues,
        }
    }
}
