//! Cheap post-write sanity checks: confirm a file at least looks like a
//! save before trusting it, and a stronger whole-file checksum for callers
//! that want it.

use std::fs;
use std::io::Read;
use std::path::Path;

use derive_more::derive::{Display, Error, From};
use sha2::{Digest, Sha256};

use crate::codec::envelope::{MAGIC, MAX_HEADER_VERSION, MIN_HEADER_VERSION};
use crate::io::{BinaryIoError, BinaryReader};

#[derive(Debug, Display, Error, From)]
pub enum IntegrityError {
    #[display("io error: {_0}")]
    Io(#[error(source)] std::io::Error),
    #[display("binary io error: {_0}")]
    BinaryIo(#[error(source)] BinaryIoError),
    #[display("magic bytes {found:02x?} do not match the expected TWSV header")]
    BadMagic { found: [u8; 4] },
    #[display("header version {version} is outside the supported [1,10] range")]
    BadVersion { version: i32 },
}

/// Opens `path`, reads the magic and header version, and confirms both are
/// plausible. Does not touch the body or compute a checksum.
pub fn verify_integrity(path: &Path) -> Result<(), IntegrityError> {
    let file = fs::File::open(path)?;
    let mut reader = BinaryReader::new(file);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(IntegrityError::BadMagic { found: magic });
    }

    let header_version = reader.read_i32()?;
    if !(MIN_HEADER_VERSION..=MAX_HEADER_VERSION).contains(&header_version) {
        return Err(IntegrityError::BadVersion {
            version: header_version,
        });
    }

    Ok(())
}

/// SHA-256 of the entire file, as a lowercase hex string.
pub fn checksum(path: &Path) -> Result<String, std::io::Error> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::envelope;
    use crate::domain::save::Header;
    use crate::io::BinaryWriter;
    use pretty_assertions::assert_eq;

    #[test]
    fn verify_integrity_accepts_a_well_formed_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sav");
        let mut bytes = Vec::new();
        {
            let mut writer = BinaryWriter::new(&mut bytes);
            envelope::write_header(
                &mut writer,
                &Header {
                    header_version: 3,
                    game_version: "1.0".to_owned(),
                    modules: Vec::new(),
                },
            )
            .unwrap();
        }
        fs::write(&path, &bytes).unwrap();
        assert!(verify_integrity(&path).is_ok());
    }

    #[test]
    fn verify_integrity_rejects_bad_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sav");
        fs::write(&path, b"NOPE\x01\x00\x00\x00").unwrap();
        assert!(matches!(
            verify_integrity(&path),
            Err(IntegrityError::BadMagic { .. })
        ));
    }

    #[test]
    fn checksum_is_stable_for_identical_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path_a = dir.path().join("a.sav");
        let path_b = dir.path().join("b.sav");
        fs::write(&path_a, b"identical bytes").unwrap();
        fs::write(&path_b, b"identical bytes").unwrap();
        assert_eq!(checksum(&path_a).unwrap(), checksum(&path_b).unwrap());
    }
}
