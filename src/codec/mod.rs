//! Parses the save file envelope into the domain graph and writes it back.
//! Owns the segment registry; the transactional write protocol itself
//! (backup, temp file, verify, rename) lives in [`crate::pipeline`], which
//! calls [`encode`] for the bytes to write.

pub mod envelope;
pub mod error;
pub mod metadata;
pub mod segments;
pub mod wire;

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cancel::CancellationToken;
use crate::compression::{self, CompressionLevel};
use crate::config::SaveEngineConfig;
use crate::domain::save::Header;
use crate::domain::Save;
use crate::io::{BinaryReader, BinaryWriter};
use error::{LoadError, SaveError};

/// The light metadata-only view used for directory discovery. Never
/// decompresses the body.
#[derive(Clone, Debug)]
pub struct SaveInfo {
    pub path: std::path::PathBuf,
    pub file_size: u64,
    pub last_modified: Option<DateTime<Utc>>,
    pub header: Header,
    pub module_ids: Vec<String>,
    pub has_naval_expansion: bool,
    pub character_name: String,
    pub level: i32,
    pub day: i32,
    pub play_time: i64,
    pub clan_name: String,
    pub gold: i32,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub metadata_only: bool,
    pub keep_raw_body: bool,
    pub permissive: bool,
    pub skip_validation: bool,
}

/// Reads magic/header/modules/metadata only; does not decompress the body.
pub fn load_info(path: &Path, config: &SaveEngineConfig) -> Result<SaveInfo, LoadError> {
    let file = fs::File::open(path)?;
    let metadata_fs = file.metadata()?;
    let file_size = metadata_fs.len();
    let last_modified = metadata_fs
        .modified()
        .ok()
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map(|d| DateTime::<Utc>::from_timestamp(d.as_secs() as i64, d.subsec_nanos()))
        .flatten();

    let mut reader = BinaryReader::new(file);
    let parsed = envelope::read_header(&mut reader, false, config.max_string_bytes)?;

    let metadata_json = reader.read_string(config.max_string_bytes)?;
    let (metadata, _warnings) = metadata::decode(&metadata_json);

    let module_ids: Vec<String> = parsed
        .header
        .module_ids()
        .map(|s| s.to_owned())
        .collect();
    let has_naval_expansion = config.has_naval_expansion(&module_ids);

    Ok(SaveInfo {
        path: path.to_owned(),
        file_size,
        last_modified,
        header: parsed.header,
        module_ids,
        has_naval_expansion,
        character_name: metadata.character_name,
        level: metadata.main_hero_level,
        day: metadata.day,
        play_time: metadata.play_time,
        clan_name: metadata.clan_name,
        gold: metadata.gold,
    })
}

/// Full parse: envelope, decompressed body, and every segment.
pub fn load(
    path: &Path,
    options: &LoadOptions,
    config: &SaveEngineConfig,
    cancel: &CancellationToken,
) -> Result<Save, LoadError> {
    cancel.check()?;

    let file = fs::File::open(path)?;
    let mut reader = BinaryReader::new(file);
    let parsed = envelope::read_header(&mut reader, options.permissive, config.max_string_bytes)?;

    let metadata_json = reader.read_string(config.max_string_bytes)?;
    let (metadata, metadata_warnings) = metadata::decode(&metadata_json);
    for warning in &metadata_warnings {
        debug!(warning, "metadata warning during load");
    }

    let mut save = Save::new();
    save.header = parsed.header;
    save.metadata = metadata;

    if options.metadata_only {
        info!(path = %path.display(), "loaded metadata-only save");
        return Ok(save);
    }

    cancel.check()?;

    let compressed_len = reader.read_i32()?.max(0) as usize;
    let uncompressed_len = reader.read_i32().ok().filter(|&n| n >= 0).map(|n| n as u64);
    if compressed_len as u64 > config.max_decompressed_bytes {
        return Err(LoadError::CompressedBodyTooLarge {
            actual: compressed_len as u64,
            cap: config.max_decompressed_bytes,
        });
    }
    let mut compressed_body = vec![0u8; compressed_len];
    reader.read_exact(&mut compressed_body)?;

    let body = compression::decompress(
        &compressed_body,
        uncompressed_len,
        config.max_decompressed_bytes,
    )?;

    let has_naval_expansion = save.has_naval_expansion(&config.naval_expansion_module_ids);

    let mut body_reader = BinaryReader::new(Cursor::new(&body));
    loop {
        cancel.check()?;
        let tag = match body_reader.read_u16() {
            Ok(tag) => tag,
            Err(_) => break,
        };
        let payload = match body_reader.read_bytes(config.max_segment_bytes) {
            Ok(payload) => payload,
            Err(e) => {
                if options.permissive {
                    debug!(error = %e, "truncated trailing segment ignored in permissive mode");
                    break;
                }
                return Err(e.into());
            }
        };

        segments::decode_segment(tag, &payload, &mut save, config, has_naval_expansion)?;
    }

    if options.keep_raw_body {
        save.raw_body = Some(body);
    }

    info!(path = %path.display(), heroes = save.heroes.len(), "loaded save");
    Ok(save)
}

/// Encodes `save` to the full on-disk envelope + compressed body byte
/// stream. Does not touch the filesystem; [`crate::pipeline`] is
/// responsible for the temp-file/rename write protocol.
pub fn encode(save: &Save, compression_level: CompressionLevel) -> Result<Vec<u8>, SaveError> {
    let mut body = Vec::new();
    {
        let mut body_writer = BinaryWriter::new(&mut body);
        for (tag, payload) in segments::encode_all(save)? {
            body_writer.write_u16(tag)?;
            body_writer.write_bytes(&payload)?;
        }
    }

    let uncompressed_len = body.len() as i32;
    let compressed_body = compression::compress(&body, compression_level)?;

    let mut out = Vec::new();
    {
        let mut writer = BinaryWriter::new(&mut out);
        envelope::write_header(&mut writer, &save.header)?;
        writer.write_string(&metadata::encode(&save.metadata))?;
        writer.write_i32(compressed_body.len() as i32)?;
        writer.write_i32(uncompressed_len)?;
        writer.write_exact(&compressed_body)?;
    }

    Ok(out)
}
