//! Pre-write backup snapshots: a gzip-compressed copy of the file about to
//! be overwritten, stamped with a UTC timestamp, in a sibling directory.
//! Failure here is never fatal to the save — the caller logs a warning and
//! continues.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use derive_more::derive::{Display, Error, From};
use flate2::{write::GzEncoder, Compression};

#[derive(Debug, Display, Error, From)]
pub enum BackupError {
    #[display("io error: {_0}")]
    Io(#[error(source)] std::io::Error),
}

/// Writes `<backup_dir>/<original-stem>_<utc_timestamp>.sav.gz` and returns
/// its path. `backup_dir` is created if missing.
pub fn snapshot(path: &Path, backup_dir_name: &str) -> Result<PathBuf, BackupError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let backup_dir = parent.join(backup_dir_name);
    fs::create_dir_all(&backup_dir)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "save".to_owned());
    let timestamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    let backup_path = backup_dir.join(format!("{stem}_{timestamp}.sav.gz"));

    let original = fs::read(path)?;
    let file = fs::File::create(&backup_path)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(&original)?;
    encoder.finish()?;

    Ok(backup_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    #[test]
    fn snapshot_writes_a_gzip_copy_into_the_backup_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campaign.sav");
        fs::write(&path, b"hello save file").unwrap();

        let backup_path = snapshot(&path, "_SaveEditorBackups").unwrap();

        assert!(backup_path.starts_with(dir.path().join("_SaveEditorBackups")));
        assert!(backup_path.to_string_lossy().ends_with(".sav.gz"));

        let compressed = fs::read(&backup_path).unwrap();
        let mut decoder = flate2::read::GzDecoder::new(&compressed[..]);
        let mut restored = String::new();
        decoder.read_to_string(&mut restored).unwrap();
        assert_eq!(restored, "hello save file");
    }
}
