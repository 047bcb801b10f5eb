//! Segment `0x0001`: the campaign clock, a bare `i64` tick count.

use std::io::Cursor;

use crate::codec::error::SegmentError;
use crate::domain::Save;
use crate::io::{BinaryReader, BinaryWriter};

pub const TAG: u16 = 0x0001;

pub fn decode(payload: &[u8], save: &mut Save) -> Result<(), SegmentError> {
    let mut reader = BinaryReader::new(Cursor::new(payload));
    save.campaign_time_ticks = reader.read_i64()?;
    Ok(())
}

pub fn encode(save: &Save) -> Result<Vec<u8>, SegmentError> {
    let mut buf = Vec::new();
    let mut writer = BinaryWriter::new(&mut buf);
    writer.write_i64(save.campaign_time_ticks)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encode_then_decode_round_trips() {
        let mut save = Save::new();
        save.campaign_time_ticks = 123_456_789_000;

        let encoded = encode(&save).unwrap();
        let mut decoded = Save::new();
        decode(&encoded, &mut decoded).unwrap();

        assert_eq!(decoded.campaign_time_ticks, save.campaign_time_ticks);
    }
}
