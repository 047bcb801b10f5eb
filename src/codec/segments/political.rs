//! Segments `0x0030`-`0x0033`: clans, kingdoms, settlements, factions.
//! Grouped into one module since all four share the same shape (a
//! name/color/reference bag with no segment-specific framing).

use std::io::Cursor;

use crate::codec::error::SegmentError;
use crate::codec::wire::{read_entity_id, write_entity_id};
use crate::config::SaveEngineConfig;
use crate::domain::common::Color;
use crate::domain::political::{Clan, Faction, FactionKind, Kingdom, Settlement, SettlementType};
use crate::domain::Save;
use crate::io::{BinaryReader, BinaryWriter};

pub const CLANS_TAG: u16 = 0x0030;
pub const KINGDOMS_TAG: u16 = 0x0031;
pub const SETTLEMENTS_TAG: u16 = 0x0032;
pub const FACTIONS_TAG: u16 = 0x0033;

fn read_color<R: std::io::Read>(reader: &mut BinaryReader<R>) -> Result<Color, SegmentError> {
    Ok(Color(reader.read_u32()?))
}

fn write_color<W: std::io::Write>(
    writer: &mut BinaryWriter<W>,
    color: Color,
) -> Result<(), SegmentError> {
    writer.write_u32(color.0)?;
    Ok(())
}

fn settlement_type_to_u8(t: SettlementType) -> u8 {
    match t {
        SettlementType::Town => 0,
        SettlementType::Castle => 1,
        SettlementType::Village => 2,
    }
}

fn settlement_type_from_u8(v: u8) -> Result<SettlementType, SegmentError> {
    match v {
        0 => Ok(SettlementType::Town),
        1 => Ok(SettlementType::Castle),
        2 => Ok(SettlementType::Village),
        other => Err(SegmentError::InvalidDiscriminant {
            field: "Settlement.settlement_type",
            value: other as u32,
        }),
    }
}

fn faction_kind_to_u8(k: FactionKind) -> u8 {
    match k {
        FactionKind::Kingdom => 0,
        FactionKind::Bandit => 1,
        FactionKind::Neutral => 2,
    }
}

fn faction_kind_from_u8(v: u8) -> Result<FactionKind, SegmentError> {
    match v {
        0 => Ok(FactionKind::Kingdom),
        1 => Ok(FactionKind::Bandit),
        2 => Ok(FactionKind::Neutral),
        other => Err(SegmentError::InvalidDiscriminant {
            field: "Faction.kind",
            value: other as u32,
        }),
    }
}

pub fn decode_clans(
    payload: &[u8],
    save: &mut Save,
    config: &SaveEngineConfig,
) -> Result<(), SegmentError> {
    let mut reader = BinaryReader::new(Cursor::new(payload));
    let count = reader.read_i32()?.max(0);
    for _ in 0..count {
        let id = read_entity_id(&mut reader)?;
        let name = reader.read_string(config.max_string_bytes)?;
        let color = read_color(&mut reader)?;
        let leader_id = read_entity_id(&mut reader)?;
        let influence = reader.read_i32()?;
        let gold = reader.read_i32()?;
        let kingdom_id = read_entity_id(&mut reader)?;
        let settlement_count = reader.read_i32()?.max(0);
        let mut settlements = Vec::with_capacity(settlement_count as usize);
        for _ in 0..settlement_count {
            settlements.push(read_entity_id(&mut reader)?);
        }
        let is_eliminated = reader.read_bool()?;
        save.clans.insert(
            id,
            Clan {
                id,
                name,
                color,
                leader_id,
                influence,
                gold,
                kingdom_id,
                settlements,
                is_eliminated,
            },
        );
    }
    Ok(())
}

pub fn encode_clans(save: &Save) -> Result<Vec<u8>, SegmentError> {
    let mut buf = Vec::new();
    let mut writer = BinaryWriter::new(&mut buf);
    writer.write_i32(save.clans.len() as i32)?;
    for clan in save.clans.values() {
        write_entity_id(&mut writer, clan.id)?;
        writer.write_string(&clan.name)?;
        write_color(&mut writer, clan.color)?;
        write_entity_id(&mut writer, clan.leader_id)?;
        writer.write_i32(clan.influence)?;
        writer.write_i32(clan.gold)?;
        write_entity_id(&mut writer, clan.kingdom_id)?;
        writer.write_i32(clan.settlements.len() as i32)?;
        for settlement_id in &clan.settlements {
            write_entity_id(&mut writer, *settlement_id)?;
        }
        writer.write_bool(clan.is_eliminated)?;
    }
    Ok(buf)
}

pub fn decode_kingdoms(
    payload: &[u8],
    save: &mut Save,
    config: &SaveEngineConfig,
) -> Result<(), SegmentError> {
    let mut reader = BinaryReader::new(Cursor::new(payload));
    let count = reader.read_i32()?.max(0);
    for _ in 0..count {
        let id = read_entity_id(&mut reader)?;
        let name = reader.read_string(config.max_string_bytes)?;
        let color = read_color(&mut reader)?;
        let ruler_clan_id = read_entity_id(&mut reader)?;
        let clan_count = reader.read_i32()?.max(0);
        let mut clans = Vec::with_capacity(clan_count as usize);
        for _ in 0..clan_count {
            clans.push(read_entity_id(&mut reader)?);
        }
        let is_eliminated = reader.read_bool()?;
        save.kingdoms.insert(
            id,
            Kingdom {
                id,
                name,
                color,
                ruler_clan_id,
                clans,
                is_eliminated,
            },
        );
    }
    Ok(())
}

pub fn encode_kingdoms(save: &Save) -> Result<Vec<u8>, SegmentError> {
    let mut buf = Vec::new();
    let mut writer = BinaryWriter::new(&mut buf);
    writer.write_i32(save.kingdoms.len() as i32)?;
    for kingdom in save.kingdoms.values() {
        write_entity_id(&mut writer, kingdom.id)?;
        writer.write_string(&kingdom.name)?;
        write_color(&mut writer, kingdom.color)?;
        write_entity_id(&mut writer, kingdom.ruler_clan_id)?;
        writer.write_i32(kingdom.clans.len() as i32)?;
        for clan_id in &kingdom.clans {
            write_entity_id(&mut writer, *clan_id)?;
        }
        writer.write_bool(kingdom.is_eliminated)?;
    }
    Ok(buf)
}

pub fn decode_settlements(
    payload: &[u8],
    save: &mut Save,
    config: &SaveEngineConfig,
) -> Result<(), SegmentError> {
    let mut reader = BinaryReader::new(Cursor::new(payload));
    let count = reader.read_i32()?.max(0);
    for _ in 0..count {
        let id = read_entity_id(&mut reader)?;
        let name = reader.read_string(config.max_string_bytes)?;
        let color = read_color(&mut reader)?;
        let settlement_type = settlement_type_from_u8({
            let mut b = [0u8; 1];
            reader.read_exact(&mut b)?;
            b[0]
        })?;
        let prosperity = reader.read_i32()?;
        let owner_clan_id = read_entity_id(&mut reader)?;
        let kingdom_id = read_entity_id(&mut reader)?;
        let position_x = reader.read_f32()?;
        let position_y = reader.read_f32()?;
        save.settlements.insert(
            id,
            Settlement {
                id,
                name,
                color,
                settlement_type,
                prosperity,
                owner_clan_id,
                kingdom_id,
                position: crate::domain::common::Position::new(position_x, position_y),
            },
        );
    }
    Ok(())
}

pub fn encode_settlements(save: &Save) -> Result<Vec<u8>, SegmentError> {
    let mut buf = Vec::new();
    let mut writer = BinaryWriter::new(&mut buf);
    writer.write_i32(save.settlements.len() as i32)?;
    for settlement in save.settlements.values() {
        write_entity_id(&mut writer, settlement.id)?;
        writer.write_string(&settlement.name)?;
        write_color(&mut writer, settlement.color)?;
        writer.write_exact(&[settlement_type_to_u8(settlement.settlement_type)])?;
        writer.write_i32(settlement.prosperity)?;
        write_entity_id(&mut writer, settlement.owner_clan_id)?;
        write_entity_id(&mut writer, settlement.kingdom_id)?;
        writer.write_f32(settlement.position.x)?;
        writer.write_f32(settlement.position.y)?;
    }
    Ok(buf)
}

pub fn decode_factions(
    payload: &[u8],
    save: &mut Save,
    config: &SaveEngineConfig,
) -> Result<(), SegmentError> {
    let mut reader = BinaryReader::new(Cursor::new(payload));
    let count = reader.read_i32()?.max(0);
    for _ in 0..count {
        let id = read_entity_id(&mut reader)?;
        let name = reader.read_string(config.max_string_bytes)?;
        let color = read_color(&mut reader)?;
        let kind = faction_kind_from_u8({
            let mut b = [0u8; 1];
            reader.read_exact(&mut b)?;
            b[0]
        })?;
        save.factions.insert(
            id,
            Faction {
                id,
                name,
                color,
                kind,
            },
        );
    }
    Ok(())
}

pub fn encode_factions(save: &Save) -> Result<Vec<u8>, SegmentError> {
    let mut buf = Vec::new();
    let mut writer = BinaryWriter::new(&mut buf);
    writer.write_i32(save.factions.len() as i32)?;
    for faction in save.factions.values() {
        write_entity_id(&mut writer, faction.id)?;
        writer.write_string(&faction.name)?;
        write_color(&mut writer, faction.color)?;
        writer.write_exact(&[faction_kind_to_u8(faction.kind)])?;
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

        let kingdom_id = save.allocate_id(TypeTag::Kingdom);
        let clan_id = save.allocate_id(TypeTag::Clan);
        let settlement_id = save.allocate_id(TypeTag::Settlement);
        let faction_id = save.allocate_id(TypeTag::Faction);

        save.kingdoms.insert(
            kingdom_id,
            Kingdom {
                id: kingdom_id,
                name: "Southern Empire".to_owned(),
                color: Color(0x00FF00),
                ruler_clan_id: clan_id,
                clans: vec![clan_id],
                is_eliminated: false,
            },
        );
        save.clans.insert(
            clan_id,
            Clan {
                id: clan_id,
                name: "House Dellan".to_owned(),
                color: Color(0x0000FF),
                kingdom_id,
                settlements: vec![settlement_id],
                influence: 250,
                gold: 5_000,
                ..Clan::default()
            },
        );
        save.settlements.insert(
            settlement_id,
            Settlement {
                id: settlement_id,
                name: "Pravend".to_owned(),
                settlement_type: SettlementType::Town,
                owner_clan_id: clan_id,
                kingdom_id,
                prosperity: 4_200,
                ..Settlement::default()
            },
        );
        save.factions.insert(
            faction_id,
            Faction {
                id: faction_id,
                name: "Desert Bandits".to_owned(),
                kind: FactionKind::Bandit,
                ..Faction::default()
            },
        );

        let encoded_kingdoms = encode_kingdoms(&save).unwrap();
        let encoded_clans = encode_clans(&save).unwrap();
        let encoded_settlements = encode_settlements(&save).unwrap();
        let encoded_factions = encode_factions(&save).unwrap();

        let mut decoded = Save::new();
        decode_kingdoms(&encoded_kingdoms, &mut decoded, &config).unwrap();
        decode_clans(&encoded_clans, &mut decoded, &config).unwrap();
        decode_settlements(&encoded_settlements, &mut decoded, &config).unwrap();
        decode_factions(&encoded_factions, &mut decoded, &config).unwrap();

        assert_eq!(decoded.kingdoms[&kingdom_id].name, "Southern Empire");
        assert_eq!(decoded.kingdoms[&kingdom_id].clans, vec![clan_id]);
        assert_eq!(decoded.clans[&clan_id].name, "House Dellan");
        assert_eq!(decoded.clans[&clan_id].influence, 250);
        assert_eq!(decoded.settlements[&settlement_id].name, "Pravend");
        assert_eq!(
            decoded.settlements[&settlement_id].settlement_type,
            SettlementType::Town
        );
        assert_eq!(decoded.factions[&faction_id].name, "Desert Bandits");
        assert_eq!(decoded.factions[&faction_id].kind, FactionKind::Bandit);
    }
}
