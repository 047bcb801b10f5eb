//! Segment `0x0020`: the party list.

use std::io::Cursor;

use crate::codec::error::SegmentError;
use crate::codec::wire::{read_entity_id, write_entity_id};
use crate::config::SaveEngineConfig;
use crate::domain::common::TroopStack;
use crate::domain::party::{Party, PartyState, PartyType};
use crate::domain::Save;
use crate::io::{BinaryReader, BinaryWriter};

pub const TAG: u16 = 0x0020;

fn party_type_to_u8(t: PartyType) -> u8 {
    match t {
        PartyType::Lord => 0,
        PartyType::Caravan => 1,
        PartyType::Village => 2,
        PartyType::Garrison => 3,
        PartyType::Bandit => 4,
        PartyType::MinorFactionRaider => 5,
    }
}

fn party_type_from_u8(v: u8) -> Result<PartyType, SegmentError> {
    match v {
        0 => Ok(PartyType::Lord),
        1 => Ok(PartyType::Caravan),
        2 => Ok(PartyType::Village),
        3 => Ok(PartyType::Garrison),
        4 => Ok(PartyType::Bandit),
        5 => Ok(PartyType::MinorFactionRaider),
        other => Err(SegmentError::InvalidDiscriminant {
            field: "Party.party_type",
            value: other as u32,
        }),
    }
}

fn party_state_to_u8(s: PartyState) -> u8 {
    match s {
        PartyState::Active => 0,
        PartyState::InSettlement => 1,
        PartyState::Besieging => 2,
        PartyState::InBattle => 3,
        PartyState::Disbanding => 4,
    }
}

fn party_state_from_u8(v: u8) -> Result<PartyState, SegmentError> {
    match v {
        0 => Ok(PartyState::Active),
        1 => Ok(PartyState::InSettlement),
        2 => Ok(PartyState::Besieging),
        3 => Ok(PartyState::InBattle),
        4 => Ok(PartyState::Disbanding),
        other => Err(SegmentError::InvalidDiscriminant {
            field: "Party.state",
            value: other as u32,
        }),
    }
}

fn read_troop_stack<R: std::io::Read>(
    reader: &mut BinaryReader<R>,
    config: &SaveEngineConfig,
) -> Result<TroopStack, SegmentError> {
    Ok(TroopStack {
        troop_id: reader.read_string(config.max_string_bytes)?,
        troop_name: reader.read_string(config.max_string_bytes)?,
        count: reader.read_i32()?,
        wounded_count: reader.read_i32()?,
        tier: reader.read_i32()?,
        is_hero: reader.read_bool()?,
        hero_id: read_entity_id(reader)?,
    })
}

fn write_troop_stack<W: std::io::Write>(
    writer: &mut BinaryWriter<W>,
    stack: &TroopStack,
) -> Result<(), SegmentError> {
    writer.write_string(&stack.troop_id)?;
    writer.write_string(&stack.troop_name)?;
    writer.write_i32(stack.count)?;
    writer.write_i32(stack.wounded_count)?;
    writer.write_i32(stack.tier)?;
    writer.write_bool(stack.is_hero)?;
    write_entity_id(writer, stack.hero_id)?;
    Ok(())
}

pub fn decode(payload: &[u8], save: &mut Save, config: &SaveEngineConfig) -> Result<(), SegmentError> {
    let mut reader = BinaryReader::new(Cursor::new(payload));
    let count = reader.read_i32()?.max(0);

    for _ in 0..count {
        let id = read_entity_id(&mut reader)?;
        let name = reader.read_string(config.max_string_bytes)?;
        let party_type = party_type_from_u8({
            let mut buf = [0u8; 1];
            reader.read_exact(&mut buf)?;
            buf[0]
        })?;
        let state = party_state_from_u8({
            let mut buf = [0u8; 1];
            reader.read_exact(&mut buf)?;
            buf[0]
        })?;
        let gold = reader.read_i32()?;
        let food = reader.read_i32()?;
        let morale = reader.read_i32()?;
        let party_size_limit = reader.read_i32()?;
        let prisoner_limit = reader.read_i32()?;

        let troop_count = reader.read_i32()?.max(0);
        let mut troops = Vec::with_capacity(troop_count as usize);
        for _ in 0..troop_count {
            troops.push(read_troop_stack(&mut reader, config)?);
        }

        let prisoner_count = reader.read_i32()?.max(0);
        let mut prisoners = Vec::with_capacity(prisoner_count as usize);
        for _ in 0..prisoner_count {
            prisoners.push(read_troop_stack(&mut reader, config)?);
        }

        let leader_id = read_entity_id(&mut reader)?;
        let current_settlement_id = read_entity_id(&mut reader)?;
        let position_x = reader.read_f32()?;
        let position_y = reader.read_f32()?;

        save.parties.insert(
            id,
            Party {
                id,
                name,
                party_type,
                state,
                gold,
                food,
                morale,
                party_size_limit,
                prisoner_limit,
                troops,
                prisoners,
                leader_id,
                current_settlement_id,
                position: crate::domain::common::Position::new(position_x, position_y),
            },
        );
    }

    Ok(())
}

pub fn encode(save: &Save) -> Result<Vec<u8>, SegmentError> {
    let mut buf = Vec::new();
    let mut writer = BinaryWriter::new(&mut buf);

    writer.write_i32(save.parties.len() as i32)?;
    for party in save.parties.values() {
        write_entity_id(&mut writer, party.id)?;
        writer.write_string(&party.name)?;
        writer.write_exact(&[party_type_to_u8(party.party_type)])?;
        writer.write_exact(&[party_state_to_u8(party.state)])?;
        writer.write_i32(party.gold)?;
        writer.write_i32(party.food)?;
        writer.write_i32(party.morale)?;
        writer.write_i32(party.party_size_limit)?;
        writer.write_i32(party.prisoner_limit)?;

        writer.write_i32(party.troops.len() as i32)?;
        for stack in &party.troops {
            write_troop_stack(&mut writer, stack)?;
        }

        writer.write_i32(party.prisoners.len() as i32)?;
        for stack in &party.prisoners {
            write_troop_stack(&mut writer, stack)?;
        }

        write_entity_id(&mut writer, party.leader_id)?;
        write_entity_id(&mut writer, party.current_settlement_id)?;
        writer.write_f32(party.position.x)?;
        writer.write_f32(party.position.y)?;
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::id::TypeTag;

    #[test]
    fn round_trips_a_party_with_troops_and_prisoners() {
        let config = SaveEngineConfig::default();
        let mut save = Save::new();
        let id = save.allocate_id(TypeTag::Party);
        let mut party = Party {
            id,
            name: "Derthert's Host".to_owned(),
            gold: 10_000,
            food: 50,
            morale: 75,
            ..Party::default()
        };
        party.troops.push(TroopStack {
            troop_id: "imperial_infantry".to_owned(),
            troop_name: "Imperial Infantry".to_owned(),
            count: 40,
            wounded_count: 5,
            tier: 3,
            is_hero: false,
            hero_id: crate::id::EntityId::EMPTY,
        });
        save.parties.insert(id, party.clone());

        let encoded = encode(&save).unwrap();
        let mut decoded = Save::new();
        decode(&encoded, &mut decoded, &config).unwrap();

        let round_tripped = &decoded.parties[&id];
        assert_eq!(round_tripped.name, party.name);
        assert_eq!(round_tripped.gold, 10_000);
        assert_eq!(round_tripped.food, 50);
        assert_eq!(round_tripped.morale, 75);
        assert_eq!(round_tripped.troops.len(), 1);
        assert_eq!(round_tripped.troops[0].count, 40);
    }
}
