//! ZLIB framing wrapper over raw deflate.
//!
//! A save file's compressed body is a standard ZLIB stream: a 2-byte header,
//! a raw deflate payload, and an Adler-32 trailer. [`flate2`] already
//! implements this framing; this module just pins it to a level selector and
//! a bounded-allocation decompress path.

use std::io::{Read, Write};

use derive_more::derive::{Display, Error, From};
use flate2::{
    read::ZlibDecoder,
    write::ZlibEncoder,
    Compression,
};

/// Maps to `flate2::Compression`'s presets, kept separate so the domain
/// crate doesn't leak `flate2` types through its public API.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CompressionLevel {
    NoCompression,
    Fastest,
    #[default]
    Optimal,
    SmallestSize,
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Compression {
        match level {
            CompressionLevel::NoCompression => Compression::none(),
            CompressionLevel::Fastest => Compression::fast(),
            CompressionLevel::Optimal => Compression::new(6),
            CompressionLevel::SmallestSize => Compression::best(),
        }
    }
}

#[derive(Debug, Display, Error, From)]
pub enum CompressionError {
    #[display("invalid zlib header")]
    InvalidHeader,
    #[display("truncated compressed input")]
    TruncatedInput,
    #[display("decompressed size {actual} did not match expected size {expected}")]
    SizeMismatch { expected: u64, actual: u64 },
    #[display("decompressed output exceeded the {limit}-byte cap")]
    LimitExceeded { limit: u64 },
    #[display("deflate error: {_0}")]
    DeflateError(#[error(source)] std::io::Error),
}

/// Checks the first two bytes of a ZLIB stream against the standard header
/// rule: first byte `0x78`, and the 16-bit big-endian header value must be a
/// multiple of 31.
pub fn validate_header(two_bytes: [u8; 2]) -> bool {
    if two_bytes[0] != 0x78 {
        return false;
    }
    u16::from_be_bytes(two_bytes) % 31 == 0
}

pub fn compress(bytes: &[u8], level: CompressionLevel) -> Result<Vec<u8>, CompressionError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), level.into());
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Decompresses `bytes`. When `expected_size` is given, the output buffer is
/// pre-sized and the result length must equal it exactly (`SizeMismatch`
/// otherwise). When absent, growth is bounded by `limit` bytes to guard
/// against adversarial inputs (`LimitExceeded` otherwise).
pub fn decompress(
    bytes: &[u8],
    expected_size: Option<u64>,
    limit: u64,
) -> Result<Vec<u8>, CompressionError> {
    if bytes.len() < 2 || !validate_header([bytes[0], bytes[1]]) {
        return Err(CompressionError::InvalidHeader);
    }

    let mut decoder = ZlibDecoder::new(bytes);

    match expected_size {
        Some(expected) => {
            let mut out = vec![0u8; expected as usize];
            let read = read_fully_or_eof(&mut decoder, &mut out)?;
            if (read as u64) < expected {
                return Err(CompressionError::SizeMismatch {
                    expected,
                    actual: read as u64,
                });
            }
            // Confirm there's nothing left: an over-long decompression also
            // violates the size hint.
            let mut probe = [0u8; 1];
            if decoder.read(&mut probe)? != 0 {
                return Err(CompressionError::SizeMismatch {
                    expected,
                    actual: expected + 1,
                });
            }
            Ok(out)
        }
        None => {
            let mut out = Vec::new();
            let mut chunk = [0u8; 64 * 1024];
            loop {
                let n = decoder.read(&mut chunk)?;
                if n == 0 {
                    break;
                }
                if out.len() as u64 + n as u64 > limit {
                    return Err(CompressionError::LimitExceeded { limit });
                }
                out.extend_from_slice(&chunk[..n]);
            }
            Ok(out)
        }
    }
}

fn read_fully_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn validate_header_accepts_standard_zlib_header() {
        // 0x78 0x9c is the common "default compression" zlib header.
        assert!(validate_header([0x78, 0x9c]));
        assert!(validate_header([0x78, 0x01])); // no compression
        assert!(validate_header([0x78, 0xda])); // best compression
    }

    #[test]
    fn validate_header_rejects_garbage() {
        assert!(!validate_header([0x58, 0x58]));
        assert!(!validate_header([0x78, 0x00]));
    }

    #[test]
    fn round_trips_at_every_level() {
        let data = b"the quick brown fox jumps over the lazy dog".repeat(50);
        for level in [
            CompressionLevel::NoCompression,
            CompressionLevel::Fastest,
            CompressionLevel::Optimal,
            CompressionLevel::SmallestSize,
        ] {
            let compressed = compress(&data, level).unwrap();
            assert!(validate_header([compressed[0], compressed[1]]));
            let decompressed = decompress(&compressed, Some(data.len() as u64), 1024 * 1024)
                .unwrap_or_else(|e| panic!("level {level:?} failed: {e}"));
            assert_eq!(decompressed, data);

            let decompressed_no_hint = decompress(&compressed, None, 1024 * 1024).unwrap();
            assert_eq!(decompressed_no_hint, data);
        }
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let data = b"hello world".repeat(10);
        let compressed = compress(&data, CompressionLevel::Optimal).unwrap();
        let err = decompress(&compressed, Some(3), 1024).unwrap_err();
        assert!(matches!(err, CompressionError::SizeMismatch { .. }));
    }

    #[test]
    fn limit_exceeded_without_hint_is_rejected() {
        let data = vec![b'a'; 10_000];
        let compressed = compress(&data, CompressionLevel::Optimal).unwrap();
        let err = decompress(&compressed, None, 100).unwrap_err();
        assert!(matches!(err, CompressionError::LimitExceeded { .. }));
    }

    #[test]
    fn invalid_header_is_rejected() {
        let err = decompress(&[0x00, 0x00, 0x00], None, 1024).unwrap_err();
        assert!(matches!(err, CompressionError::InvalidHeader));
    }
}
