//! The transactional save pipeline: discover → load → edit → validate →
//! backup → atomic write → verify → commit. This module owns the
//! filesystem protocol; [`crate::codec`] only knows how to turn bytes into a
//! [`Save`] and back.

pub mod backup;
pub mod events;
pub mod integrity;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use crate::cancel::CancellationToken;
use crate::codec::error::{LoadError, SaveError};
use crate::codec::{self, LoadOptions};
use crate::compression::CompressionLevel;
use crate::config::SaveEngineConfig;
use crate::domain::Save;
use crate::validator::{self, Report, ValidationMode};
use events::{Event, EventBus};

/// Full-write options.
#[derive(Clone, Copy, Debug)]
pub struct SaveOptions {
    pub compression_level: CompressionLevel,
    pub validate_before_save: bool,
    pub verify_after_save: bool,
    pub create_backup: bool,
}

impl Default for SaveOptions {
    fn default() -> SaveOptions {
        SaveOptions {
            compression_level: CompressionLevel::default(),
            validate_before_save: true,
            verify_after_save: true,
            create_backup: true,
        }
    }
}

/// `load`'s result: the parsed graph, plus the validation report run against
/// it unless `LoadOptions::skip_validation` was set.
pub struct LoadResult {
    pub save: Save,
    pub report: Option<Report>,
}

/// Parses `path` into a [`Save`], optionally validates it, and emits
/// [`Event::SaveLoaded`].
pub fn load(
    path: &Path,
    options: &LoadOptions,
    config: &SaveEngineConfig,
    cancel: &CancellationToken,
    events: &EventBus,
) -> Result<LoadResult, LoadError> {
    let save = codec::load(path, options, config, cancel)?;

    let report = if options.skip_validation {
        None
    } else {
        Some(validator::validate(&save, ValidationMode::Normal))
    };

    events.emit(&Event::SaveLoaded { path });

    Ok(LoadResult { save, report })
}

/// Runs the full transactional write protocol: backup, validate, encode,
/// write to a temp file, verify, and atomically commit via a rename swap.
pub fn save(
    save: &mut Save,
    path: &Path,
    options: &SaveOptions,
    config: &SaveEngineConfig,
    cancel: &CancellationToken,
    events: &EventBus,
) -> Result<(), SaveError> {
    cancel.check()?;

    // Step 1: backup snapshot. Never fatal.
    if options.create_backup && path.exists() {
        match backup::snapshot(path, &config.backup_dir_name) {
            Ok(backup_path) => info!(path = %backup_path.display(), "wrote backup snapshot"),
            Err(e) => warn!(error = %e, "backup snapshot failed, continuing without it"),
        }
    }

    // Step 2: validate.
    if options.validate_before_save {
        let report = validator::validate(save, ValidationMode::Normal);
        if !report.errors.is_empty() {
            return Err(SaveError::ValidationFailed {
                issues: report.errors,
            });
        }
    }

    cancel.check()?;

    // Step 3: metadata bookkeeping.
    let now = Utc::now();
    if let Some(last_modified) = save.last_modified {
        save.metadata.play_time += (now - last_modified).num_seconds().max(0);
    }
    save.last_modified = Some(now);

    events.emit(&Event::SaveSaving {
        save,
        target_path: path,
    });

    // Steps 4-5: serialize + compress (delegated to the codec).
    let bytes = codec::encode(save, options.compression_level)?;

    cancel.check()?;

    // Step 6: write the temp file, flush, fsync.
    let tmp_path = tmp_path_for(path);
    {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&bytes)?;
        file.flush()?;
        file.sync_all()?;
    }

    // Step 7: verify.
    if options.verify_after_save {
        if let Err(e) = integrity::verify_integrity(&tmp_path) {
            warn!(error = %e, path = %tmp_path.display(), "post-write verification failed");
            let _ = fs::remove_file(&tmp_path);
            return Err(SaveError::VerificationFailed {
                path: tmp_path.display().to_string(),
            });
        }
    }

    // Cancellation is no longer observed past this point: the write has
    // committed once the rename below succeeds.

    // Step 8: atomic rename, via a `.bak` swap.
    let bak_path = bak_path_for(path);
    let destination_existed = path.exists();
    if destination_existed {
        if let Err(e) = fs::rename(path, &bak_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(SaveError::AtomicRenameFailed(e));
        }
    }
    if let Err(rename_err) = fs::rename(&tmp_path, path) {
        if destination_existed {
            // Best-effort restore; the original rename_err is what we report.
            let _ = fs::rename(&bak_path, path);
        }
        let _ = fs::remove_file(&tmp_path);
        return Err(SaveError::AtomicRenameFailed(rename_err));
    }
    if destination_existed {
        let _ = fs::remove_file(&bak_path);
    }

    // Step 9.
    events.emit(&Event::SaveSaved { save, path });
    info!(path = %path.display(), "save committed");

    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".tmp");
    PathBuf::from(s)
}

fn bak_path_for(path: &Path) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".bak");
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::save::Header;
    use pretty_assertions::assert_eq;

    fn sample_save() -> Save {
        let mut save = Save::new();
        save.header = Header {
            header_version: 3,
            game_version: "1.0".to_owned(),
            modules: Vec::new(),
        };
        save
    }

    #[test]
    fn save_then_load_round_trips_and_commits_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaign.sav");
        let config = SaveEngineConfig::default();
        let cancel = CancellationToken::new();
        let events = EventBus::new();

        let mut original = sample_save();
        let save_options = SaveOptions {
            create_backup: false,
            ..SaveOptions::default()
        };
        save(&mut original, &path, &save_options, &config, &cancel, &events).unwrap();

        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());
        assert!(!bak_path_for(&path).exists());

        let load_options = LoadOptions::default();
        let result = load(&path, &load_options, &config, &cancel, &events).unwrap();
        assert_eq!(result.save.header.game_version, "1.0");
        assert!(result.report.unwrap().is_valid());
    }

    #[test]
    fn a_rename_failure_leaves_the_destination_and_tmp_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaign.sav");
        let config = SaveEngineConfig::default();
        let cancel = CancellationToken::new();
        let events = EventBus::new();

        let mut original = sample_save();
        save(
            &mut original,
            &path,
            &SaveOptions {
                create_backup: false,
                ..SaveOptions::default()
            },
            &config,
            &cancel,
            &events,
        )
        .unwrap();
        let original_bytes = fs::read(&path).unwrap();

        // `path` exists as a regular file; pre-creating its `.bak` path as a
        // directory makes the destination->bak rename fail deterministically
        // (renaming a file onto an existing directory is always rejected),
        // which is step 8's first rename call.
        fs::create_dir(bak_path_for(&path)).unwrap();

        let mut second = sample_save();
        second.metadata.character_name = "should not land".to_owned();
        let err = save(
            &mut second,
            &path,
            &SaveOptions {
                create_backup: false,
                ..SaveOptions::default()
            },
            &config,
            &cancel,
            &events,
        )
        .unwrap_err();

        assert!(matches!(err, SaveError::AtomicRenameFailed(_)));
        assert!(!tmp_path_for(&path).exists());
        assert_eq!(fs::read(&path).unwrap(), original_bytes);
    }
}
