//! Error taxonomy for the codec.

use derive_more::derive::{Display, Error, From};

use crate::cancel::Cancelled;
use crate::compression::CompressionError;
use crate::io::BinaryIoError;

#[derive(Debug, Display, Error, From)]
pub enum SegmentError {
    #[display("io error: {_0}")]
    Io(#[error(source)] BinaryIoError),
    #[display("segment payload too large: {actual} bytes exceeds the {cap}-byte cap")]
    TooLarge { actual: u64, cap: u64 },
    #[display("unrecognized enum discriminant {value} while decoding {field}")]
    InvalidDiscriminant { field: &'static str, value: u32 },
}

#[derive(Debug, Display, Error, From)]
pub enum LoadError {
    #[display("io error: {_0}")]
    Io(#[error(source)] std::io::Error),
    #[display("binary io error: {_0}")]
    BinaryIo(#[error(source)] BinaryIoError),
    #[display("envelope error: {_0}")]
    Envelope(#[error(source)] crate::codec::envelope::EnvelopeError),
    #[display("decompression error: {_0}")]
    Decompression(#[error(source)] CompressionError),
    #[display("segment error: {_0}")]
    Segment(#[error(source)] SegmentError),
    #[display("compressed body length {actual} exceeds the {cap}-byte cap")]
    CompressedBodyTooLarge { actual: u64, cap: u64 },
    #[display("load was cancelled")]
    Cancelled,
}

impl From<Cancelled> for LoadError {
    fn from(_: Cancelled) -> LoadError {
        LoadError::Cancelled
    }
}

#[derive(Debug, Display, Error, From)]
pub enum SaveError {
    #[display("io error: {_0}")]
    Io(#[error(source)] std::io::Error),
    #[display("binary io error: {_0}")]
    BinaryIo(#[error(source)] BinaryIoError),
    #[display("compression error: {_0}")]
    Compression(#[error(source)] CompressionError),
    #[display("segment error: {_0}")]
    Segment(#[error(source)] SegmentError),
    #[display("validation failed: {} error(s)", issues.len())]
    ValidationFailed {
        issues: Vec<crate::validator::Issue>,
    },
    #[display("post-write verification failed at {path}")]
    VerificationFailed { path: String },
    #[display("atomic rename failed: {_0}")]
    #[from(ignore)]
    AtomicRenameFailed(#[error(source)] std::io::Error),
    #[display("save was cancelled")]
    Cancelled,
}

impl From<Cancelled> for SaveError {
    fn from(_: Cancelled) -> SaveError {
        SaveError::Cancelled
    }
}
