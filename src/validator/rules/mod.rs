//! The built-in rule set, grouped one module per entity family.
//! [`register_builtin_rules`] is the only thing [`super::Validator::default`]
//! calls; everything else here is plain functions a caller could also
//! register directly for a custom mode.

pub mod fleet;
pub mod header;
pub mod hero;
pub mod party;
pub mod refs;
pub mod ship;

use crate::id::TypeTag;
use crate::validator::Validator;

pub fn register_builtin_rules(validator: &mut Validator) {
    hero::register(validator);
    party::register(validator);
    fleet::register(validator);
    ship::register(validator);

    validator.register(TypeTag::Hero, refs::hero_refs);
    validator.register(TypeTag::Party, refs::party_refs);
}
