//! Segment `0x0040`: the quest list. `data` is opaque mod-defined state and
//! is carried verbatim, never decoded.

use std::io::Cursor;

use crate::codec::error::SegmentError;
use crate::codec::wire::{read_entity_id, write_entity_id};
use crate::config::SaveEngineConfig;
use crate::domain::quest::{Quest, QuestState};
use crate::domain::Save;
use crate::io::{BinaryReader, BinaryWriter};

pub const TAG: u16 = 0x0040;

fn quest_state_to_u8(s: QuestState) -> u8 {
    match s {
        QuestState::Active => 0,
        QuestState::Completed => 1,
        QuestState::Failed => 2,
        QuestState::Cancelled => 3,
    }
}

fn quest_state_from_u8(v: u8) -> Result<QuestState, SegmentError> {
    match v {
        0 => Ok(QuestState::Active),
        1 => Ok(QuestState::Completed),
        2 => Ok(QuestState::Failed),
        3 => Ok(QuestState::Cancelled),
        other => Err(SegmentError::InvalidDiscriminant {
            field: "Quest.state",
            value: other as u32,
        }),
    }
}

pub fn decode(payload: &[u8], save: &mut Save, config: &SaveEngineConfig) -> Result<(), SegmentError> {
    let mut reader = BinaryReader::new(Cursor::new(payload));
    let count = reader.read_i32()?.max(0);
    for _ in 0..count {
        let id = read_entity_id(&mut reader)?;
        let string_id = reader.read_string(config.max_string_bytes)?;
        let title = reader.read_string(config.max_string_bytes)?;
        let giver_id = read_entity_id(&mut reader)?;
        let state = quest_state_from_u8({
            let mut b = [0u8; 1];
            reader.read_exact(&mut b)?;
            b[0]
        })?;
        let data = reader.read_bytes(config.max_segment_bytes)?;
        save.quests.insert(
            id,
            Quest {
                id,
                string_id,
                title,
                giver_id,
                state,
                data,
            },
        );
    }
    Ok(())
}

pub fn encode(save: &Save) -> Result<Vec<u8>, SegmentError> {
    let mut buf = Vec::new();
    let mut writer = BinaryWriter::new(&mut buf);
    writer.write_i32(save.quests.len() as i32)?;
    for quest in save.quests.values() {
        write_entity_id(&mut writer, quest.id)?;
        writer.write_string(&quest.string_id)?;
        writer.write_string(&quest.title)?;
        write_entity_id(&mut writer, quest.giver_id)?;
        writer.write_exact(&[quest_state_to_u8(quest.state)])?;
        writer.write_bytes(&quest.data)?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::id::TypeTag;

    #[test]
    fn encode_then_decode_round_trips() {
        let config = SaveEngineConfig::default();
        let mut save = Save::new();
        let id = save.allocate_id(TypeTag::Quest);
        let giver_id = save.allocate_id(TypeTag::Hero);
        let quest = Quest {
            id,
            string_id: "quest_rescue_lord".to_owned(),
            title: "Rescue the Lord".to_owned(),
            giver_id,
            state: QuestState::Active,
            data: vec![9, 8, 7, 6, 5],
        };
        save.quests.insert(id, quest.clone());

        let encoded = encode(&save).unwrap();
        let mut decoded = Save::new();
        decode(&encoded, &mut decoded, &config).unwrap();

        let round_tripped = &decoded.quests[&id];
        assert_eq!(round_tripped.title, quest.title);
        assert_eq!(round_tripped.giver_id, giver_id);
        assert_eq!(round_tripped.state, quest.state);
        assert_eq!(round_tripped.data, quest.data);
    }
}
