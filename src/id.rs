//! The 64-bit compound identifier used for every entity in a [`Save`](crate::domain::Save).

use std::{
    fmt,
    str::FromStr,
    sync::atomic::{AtomicU32, Ordering},
};

use derive_more::derive::{Display, Error};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// The high 32 bits of an [`EntityId`]: which kind of entity the low 32 bits
/// count instances of.
#[repr(u32)]
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, IntoPrimitive, PartialEq, Serialize,
    TryFromPrimitive,
)]
pub enum TypeTag {
    #[default]
    Hero = 1,
    Party = 2,
    Clan = 3,
    Kingdom = 4,
    Settlement = 5,
    Fleet = 6,
    Ship = 7,
    Faction = 8,
    Quest = 9,
}

impl TypeTag {
    const ALL: [TypeTag; 9] = [
        TypeTag::Hero,
        TypeTag::Party,
        TypeTag::Clan,
        TypeTag::Kingdom,
        TypeTag::Settlement,
        TypeTag::Fleet,
        TypeTag::Ship,
        TypeTag::Faction,
        TypeTag::Quest,
    ];

    fn as_str(self) -> &'static str {
        match self {
            TypeTag::Hero => "hero",
            TypeTag::Party => "party",
            TypeTag::Clan => "clan",
            TypeTag::Kingdom => "kingdom",
            TypeTag::Settlement => "settlement",
            TypeTag::Fleet => "fleet",
            TypeTag::Ship => "ship",
            TypeTag::Faction => "faction",
            TypeTag::Quest => "quest",
        }
    }

    fn from_str_prefix(s: &str) -> Option<TypeTag> {
        TypeTag::ALL.into_iter().find(|tag| tag.as_str() == s)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 64-bit compound handle: a [`TypeTag`] in the high 32 bits, a monotonic
/// instance number in the low 32 bits.
///
/// The all-zero value is the designated [`EntityId::EMPTY`] sentinel; it
/// compares equal only to itself. Equality, ordering, and hashing are always
/// defined on the full 64-bit value, never the tag alone.
#[repr(transparent)]
#[derive(Clone, Copy, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct EntityId(u64);

impl EntityId {
    pub const EMPTY: EntityId = EntityId(0);

    pub fn new(tag: TypeTag, instance: u32) -> EntityId {
        EntityId(((u32::from(tag) as u64) << 32) | instance as u64)
    }

    pub fn is_empty(self) -> bool {
        self == EntityId::EMPTY
    }

    /// Returns `None` for [`EntityId::EMPTY`] or a value whose high bits do
    /// not correspond to a known [`TypeTag`].
    pub fn type_tag(self) -> Option<TypeTag> {
        if self.is_empty() {
            return None;
        }
        TypeTag::try_from((self.0 >> 32) as u32).ok()
    }

    pub fn instance(self) -> u32 {
        self.0 as u32
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Reconstructs an [`EntityId`] from its raw 64-bit wire form. Accepts
    /// any value, including one whose tag bits don't match a known
    /// [`TypeTag`] — such values still round-trip via [`EntityId::as_u64`]
    /// and surface as `None` from [`EntityId::type_tag`].
    pub fn from_u64_unchecked(raw: u64) -> EntityId {
        EntityId(raw)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({self})")
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("empty");
        }
        match self.type_tag() {
            Some(tag) => write!(f, "{tag}-{}", self.instance()),
            None => write!(f, "0x{:016x}", self.0),
        }
    }
}

#[derive(Clone, Debug, Display, Error)]
#[display("invalid entity id {_0:?}")]
pub struct ParseEntityIdError(#[error(not(source))] String);

impl FromStr for EntityId {
    type Err = ParseEntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(hex) = s.strip_prefix("0x") {
            if hex.len() == 16 {
                if let Ok(v) = u64::from_str_radix(hex, 16) {
                    return Ok(EntityId(v));
                }
            }
            return Err(ParseEntityIdError(s.to_owned()));
        }

        if s == "empty" {
            return Ok(EntityId::EMPTY);
        }

        let (tag_str, instance_str) = s
            .rsplit_once('-')
            .ok_or_else(|| ParseEntityIdError(s.to_owned()))?;
        let tag =
            TypeTag::from_str_prefix(tag_str).ok_or_else(|| ParseEntityIdError(s.to_owned()))?;
        let instance: u32 = instance_str
            .parse()
            .map_err(|_| ParseEntityIdError(s.to_owned()))?;

        Ok(EntityId::new(tag, instance))
    }
}

/// Process-wide generator of fresh instance numbers for newly created
/// entities. Ids read from a save retain their original value and never go
/// through this generator.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicU32,
}

impl IdGenerator {
    pub fn new() -> IdGenerator {
        IdGenerator {
            next: AtomicU32::new(1),
        }
    }

    pub fn next(&self, tag: TypeTag) -> EntityId {
        let instance = self.next.fetch_add(1, Ordering::Relaxed);
        EntityId::new(tag, instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_is_zero_and_self_equal() {
        assert_eq!(EntityId::EMPTY, EntityId::EMPTY);
        assert_eq!(EntityId::EMPTY.as_u64(), 0);
        assert!(EntityId::EMPTY.is_empty());
        assert_eq!(EntityId::EMPTY.type_tag(), None);
    }

    #[test]
    fn canonical_text_round_trips() {
        let id = EntityId::new(TypeTag::Hero, 42);
        assert_eq!(id.to_string(), "hero-42");
        assert_eq!("hero-42".parse::<EntityId>().unwrap(), id);
    }

    #[test]
    fn hex_form_round_trips() {
        let id = EntityId::new(TypeTag::Fleet, 7);
        let hex = format!("0x{:016x}", id.as_u64());
        assert_eq!(hex.parse::<EntityId>().unwrap(), id);
    }

    #[test]
    fn equality_is_on_full_value_not_just_tag() {
        let a = EntityId::new(TypeTag::Hero, 1);
        let b = EntityId::new(TypeTag::Hero, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn generator_produces_unique_increasing_ids() {
        let gen = IdGenerator::new();
        let a = gen.next(TypeTag::Party);
        let b = gen.next(TypeTag::Party);
        assert_ne!(a, b);
        assert!(a.instance() < b.instance());
    }
}
