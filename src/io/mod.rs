//! Length-prefixed strings, fixed-width little-endian integers, and bounded
//! allocation primitives.
//!
//! Manual byte-slicing: no external binary-serialization crate, just
//! `from_le_bytes`/`to_le_bytes` plus a `Read`/`Write` wrapper that checks
//! length prefixes against a cap before allocating.

use std::io::{self, Read, Write};

use derive_more::derive::{Display, Error, From};

#[derive(Debug, Display, Error, From)]
pub enum BinaryIoError {
    #[display("io error: {_0}")]
    Io(std::io::Error),
    #[display("string length prefix {len} exceeds the {cap}-byte cap")]
    StringTooLarge { len: i64, cap: u32 },
    #[display("negative length prefix {len}")]
    NegativeLength { len: i32 },
    #[display("bytes are not valid utf-8")]
    InvalidUtf8,
}

/// Thin wrapper around any [`Read`] implementing the envelope's fixed-width
/// and length-prefixed primitives.
pub struct BinaryReader<R> {
    inner: R,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(inner: R) -> BinaryReader<R> {
        BinaryReader { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads exactly `buf.len()` bytes, for fixed-size fields like the magic
    /// number that don't fit the primitive helpers below.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), BinaryIoError> {
        self.inner.read_exact(buf)?;
        Ok(())
    }

    pub fn read_bool(&mut self) -> Result<bool, BinaryIoError> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf)?;
        Ok(buf[0] != 0)
    }

    pub fn read_u16(&mut self) -> Result<u16, BinaryIoError> {
        let mut buf = [0u8; 2];
        self.inner.read_exact(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_i32(&mut self) -> Result<i32, BinaryIoError> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    pub fn read_u32(&mut self) -> Result<u32, BinaryIoError> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    pub fn read_f32(&mut self) -> Result<f32, BinaryIoError> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(f32::from_le_bytes(buf))
    }

    pub fn read_i64(&mut self) -> Result<i64, BinaryIoError> {
        let mut buf = [0u8; 8];
        self.inner.read_exact(&mut buf)?;
        Ok(i64::from_le_bytes(buf))
    }

    pub fn read_u64(&mut self) -> Result<u64, BinaryIoError> {
        let mut buf = [0u8; 8];
        self.inner.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Reads an `i32` length prefix followed by that many UTF-8 bytes. A
    /// length `<= 0` yields an empty string. Rejects a prefix larger than
    /// `cap` before allocating.
    pub fn read_string(&mut self, cap: u32) -> Result<String, BinaryIoError> {
        let len = self.read_i32()?;
        if len <= 0 {
            return Ok(String::new());
        }
        if len as i64 > cap as i64 {
            return Err(BinaryIoError::StringTooLarge {
                len: len as i64,
                cap,
            });
        }
        let mut buf = vec![0u8; len as usize];
        self.inner.read_exact(&mut buf)?;
        String::from_utf8(buf).map_err(|_| BinaryIoError::InvalidUtf8)
    }

    /// Reads a length-prefixed byte blob the same way [`read_string`] reads a
    /// length-prefixed string, for segment payloads and other opaque blobs.
    pub fn read_bytes(&mut self, cap: u32) -> Result<Vec<u8>, BinaryIoError> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(BinaryIoError::NegativeLength { len });
        }
        if len as i64 > cap as i64 {
            return Err(BinaryIoError::StringTooLarge {
                len: len as i64,
                cap,
            });
        }
        let mut buf = vec![0u8; len as usize];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }
}

pub struct BinaryWriter<W> {
    inner: W,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(inner: W) -> BinaryWriter<W> {
        BinaryWriter { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Writes `buf` verbatim, for fixed-size fields like the magic number.
    pub fn write_exact(&mut self, buf: &[u8]) -> Result<(), BinaryIoError> {
        self.inner.write_all(buf)?;
        Ok(())
    }

    pub fn write_bool(&mut self, v: bool) -> Result<(), BinaryIoError> {
        self.inner.write_all(&[v as u8])?;
        Ok(())
    }

    pub fn write_u16(&mut self, v: u16) -> Result<(), BinaryIoError> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn write_i32(&mut self, v: i32) -> Result<(), BinaryIoError> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn write_u32(&mut self, v: u32) -> Result<(), BinaryIoError> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn write_f32(&mut self, v: f32) -> Result<(), BinaryIoError> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn write_i64(&mut self, v: i64) -> Result<(), BinaryIoError> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn write_u64(&mut self, v: u64) -> Result<(), BinaryIoError> {
        self.inner.write_all(&v.to_le_bytes())?;
        Ok(())
    }

    pub fn write_string(&mut self, s: &str) -> Result<(), BinaryIoError> {
        self.write_i32(s.len() as i32)?;
        self.inner.write_all(s.as_bytes())?;
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BinaryIoError> {
        self.write_i32(bytes.len() as i32)?;
        self.inner.write_all(bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn round_trips_every_primitive() {
        let mut buf = Vec::new();
        {
            let mut w = BinaryWriter::new(&mut buf);
            w.write_bool(true).unwrap();
            w.write_u16(0xBEEF).unwrap();
            w.write_i32(-12345).unwrap();
            w.write_u32(0xDEADBEEF).unwrap();
            w.write_f32(1.5).unwrap();
            w.write_i64(-9_000_000_000).unwrap();
            w.write_string("hello").unwrap();
            w.write_bytes(&[1, 2, 3]).unwrap();
        }

        let mut r = BinaryReader::new(Cursor::new(buf));
        assert_eq!(r.read_bool().unwrap(), true);
        assert_eq!(r.read_u16().unwrap(), 0xBEEF);
        assert_eq!(r.read_i32().unwrap(), -12345);
        assert_eq!(r.read_u32().unwrap(), 0xDEADBEEF);
        assert_eq!(r.read_f32().unwrap(), 1.5);
        assert_eq!(r.read_i64().unwrap(), -9_000_000_000);
        assert_eq!(r.read_string(1024).unwrap(), "hello");
        assert_eq!(r.read_bytes(1024).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn negative_or_zero_length_string_is_empty() {
        let mut buf = Vec::new();
        BinaryWriter::new(&mut buf).write_i32(-1).unwrap();
        let mut r = BinaryReader::new(Cursor::new(buf));
        assert_eq!(r.read_string(1024).unwrap(), "");
    }

    #[test]
    fn oversize_string_length_is_rejected_before_allocating() {
        let mut buf = Vec::new();
        BinaryWriter::new(&mut buf).write_i32(1000).unwrap();
        let mut r = BinaryReader::new(Cursor::new(buf));
        let err = r.read_string(16).unwrap_err();
        assert!(matches!(err, BinaryIoError::StringTooLarge { .. }));
    }
}
