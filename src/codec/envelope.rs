//! The outer envelope: magic, header, module list, metadata JSON.

use std::io::{Read, Write};

use derive_more::derive::{Display, Error, From};
use tracing::warn;

use crate::domain::save::{Header, ModuleRef};
use crate::io::{BinaryIoError, BinaryReader, BinaryWriter};

pub const MAGIC: [u8; 4] = *b"TWSV";
pub const MIN_HEADER_VERSION: i32 = 1;
pub const MAX_HEADER_VERSION: i32 = 10;

#[derive(Debug, Display, Error, From)]
pub enum EnvelopeError {
    #[display("io error: {_0}")]
    Io(#[error(source)] BinaryIoError),
    #[display("invalid magic number")]
    InvalidMagic,
    #[display("header version {_0} is outside the supported [1,10] range")]
    UnsupportedVersion(#[error(not(source))] i32),
}

pub struct ParsedEnvelope {
    pub header: Header,
    /// Warnings accumulated while parsing in permissive mode. Empty when
    /// `permissive` is false, since any of these would instead be a hard
    /// error.
    pub warnings: Vec<String>,
}

/// Reads magic, header version, game version, and the module list. Strict
/// mode rejects a bad magic outright; permissive mode records a warning and
/// keeps going.
pub fn read_header<R: Read>(
    reader: &mut BinaryReader<R>,
    permissive: bool,
    max_string_bytes: u32,
) -> Result<ParsedEnvelope, EnvelopeError> {
    let mut warnings = Vec::new();

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        if permissive {
            warnings.push(format!("unexpected magic bytes {magic:02x?}"));
        } else {
            return Err(EnvelopeError::InvalidMagic);
        }
    }

    let header_version = reader.read_i32()?;
    if !(MIN_HEADER_VERSION..=MAX_HEADER_VERSION).contains(&header_version) {
        if permissive {
            warnings.push(format!("header version {header_version} outside [1,10]"));
        } else {
            return Err(EnvelopeError::UnsupportedVersion(header_version));
        }
    }

    let game_version = reader.read_string(max_string_bytes)?;

    let module_count = reader.read_i32()?.max(0);
    let mut modules = Vec::with_capacity(module_count as usize);
    for _ in 0..module_count {
        let id = reader.read_string(max_string_bytes)?;
        let version = reader.read_string(max_string_bytes)?;
        let is_official = reader.read_bool()?;
        modules.push(ModuleRef {
            id,
            version,
            is_official,
        });
    }

    if !warnings.is_empty() {
        warn!(count = warnings.len(), "envelope parsed with warnings");
    }

    Ok(ParsedEnvelope {
        header: Header {
            header_version,
            game_version,
            modules,
        },
        warnings,
    })
}

pub fn write_header<W: Write>(
    writer: &mut BinaryWriter<W>,
    header: &Header,
) -> Result<(), BinaryIoError> {
    writer.write_exact(&MAGIC)?;
    writer.write_i32(header.header_version)?;
    writer.write_string(&header.game_version)?;
    writer.write_i32(header.modules.len() as i32)?;
    for module in &header.modules {
        writer.write_string(&module.id)?;
        writer.write_string(&module.version)?;
        writer.write_bool(module.is_official)?;
    }
    Ok(())
}
