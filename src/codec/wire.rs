//! Small helpers shared by every `codec::segments::*` module: reading and
//! writing an [`EntityId`] and the cap-checked collection-count prefix every
//! segment uses for its entity list.

use std::io::{Read, Write};

use crate::id::EntityId;
use crate::io::{BinaryIoError, BinaryReader, BinaryWriter};

pub fn read_entity_id<R: Read>(reader: &mut BinaryReader<R>) -> Result<EntityId, BinaryIoError> {
    Ok(EntityId::from_u64_unchecked(reader.read_u64()?))
}

pub fn write_entity_id<W: Write>(
    writer: &mut BinaryWriter<W>,
    id: EntityId,
) -> Result<(), BinaryIoError> {
    writer.write_u64(id.as_u64())?;
    Ok(())
}
