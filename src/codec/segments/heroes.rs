//! Segment `0x0010`: the hero list.

use std::io::Cursor;

use crate::codec::error::SegmentError;
use crate::codec::wire::{read_entity_id, write_entity_id};
use crate::config::SaveEngineConfig;
use crate::domain::hero::{AliveState, Attributes, Gender, Hero, NavalSkills, Skill, Skills};
use crate::domain::Save;
use crate::io::{BinaryReader, BinaryWriter};

pub const TAG: u16 = 0x0010;

fn gender_to_u8(g: Gender) -> u8 {
    match g {
        Gender::Male => 0,
        Gender::Female => 1,
    }
}

fn gender_from_u8(v: u8) -> Result<Gender, SegmentError> {
    match v {
        0 => Ok(Gender::Male),
        1 => Ok(Gender::Female),
        other => Err(SegmentError::InvalidDiscriminant {
            field: "Hero.gender",
            value: other as u32,
        }),
    }
}

fn alive_state_to_u8(s: AliveState) -> u8 {
    match s {
        AliveState::Active => 0,
        AliveState::Fugitive => 1,
        AliveState::Prisoner => 2,
        AliveState::Disabled => 3,
        AliveState::Dead => 4,
    }
}

fn alive_state_from_u8(v: u8) -> Result<AliveState, SegmentError> {
    match v {
        0 => Ok(AliveState::Active),
        1 => Ok(AliveState::Fugitive),
        2 => Ok(AliveState::Prisoner),
        3 => Ok(AliveState::Disabled),
        4 => Ok(AliveState::Dead),
        other => Err(SegmentError::InvalidDiscriminant {
            field: "Hero.alive_state",
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
        let name = reader.read_string(config.max_string_bytes)?;
        let gender = gender_from_u8({
            let mut buf = [0u8; 1];
            reader.read_exact(&mut buf)?;
            buf[0]
        })?;
        let age = reader.read_i32()?;
        let is_main_hero = reader.read_bool()?;
        let alive_state = alive_state_from_u8({
            let mut buf = [0u8; 1];
            reader.read_exact(&mut buf)?;
            buf[0]
        })?;
        let level = reader.read_i32()?;
        let experience = reader.read_i32()?;
        let gold = reader.read_i32()?;
        let health = reader.read_i32()?;
        let max_health = reader.read_i32()?;

        let attributes = Attributes {
            vigor: reader.read_i32()?,
            control: reader.read_i32()?,
            endurance: reader.read_i32()?,
            cunning: reader.read_i32()?,
            social: reader.read_i32()?,
            intelligence: reader.read_i32()?,
        };

        let mut skills = Skills::default();
        for skill in Skill::ALL {
            skills.set(skill, reader.read_i32()?);
        }

        let naval_skills = if reader.read_bool()? {
            Some(NavalSkills {
                navigation: reader.read_i32()?,
                naval_tactics: reader.read_i32()?,
                naval_stewardship: reader.read_i32()?,
            })
        } else {
            None
        };

        let perk_count = reader.read_i32()?.max(0);
        let mut unlocked_perks = indexmap::IndexSet::new();
        for _ in 0..perk_count {
            unlocked_perks.insert(reader.read_string(config.max_string_bytes)?);
        }

        let appearance = if reader.read_bool()? {
            Some(reader.read_bytes(config.max_segment_bytes)?)
        } else {
            None
        };

        let clan_id = read_entity_id(&mut reader)?;
        let party_id = read_entity_id(&mut reader)?;
        let fleet_id = read_entity_id(&mut reader)?;

        save.heroes.insert(
            id,
            Hero {
                id,
                string_id,
                name,
                gender,
                age,
                is_main_hero,
                alive_state,
                level,
                experience,
                gold,
                health,
                max_health,
                attributes,
                skills,
                naval_skills,
                unlocked_perks,
                appearance,
                clan_id,
                party_id,
                fleet_id,
            },
        );
    }

    Ok(())
}

pub fn encode(save: &Save) -> Result<Vec<u8>, SegmentError> {
    let mut buf = Vec::new();
    let mut writer = BinaryWriter::new(&mut buf);

    writer.write_i32(save.heroes.len() as i32)?;
    for hero in save.heroes.values() {
        write_entity_id(&mut writer, hero.id)?;
        writer.write_string(&hero.string_id)?;
        writer.write_string(&hero.name)?;
        writer.write_exact(&[gender_to_u8(hero.gender)])?;
        writer.write_i32(hero.age)?;
        writer.write_bool(hero.is_main_hero)?;
        writer.write_exact(&[alive_state_to_u8(hero.alive_state)])?;
        writer.write_i32(hero.level)?;
        writer.write_i32(hero.experience)?;
        writer.write_i32(hero.gold)?;
        writer.write_i32(hero.health)?;
        writer.write_i32(hero.max_health)?;

        for (_, v) in hero.attributes.iter() {
            writer.write_i32(v)?;
        }

        for skill in Skill::ALL {
            writer.write_i32(hero.skills.get(skill))?;
        }

        match &hero.naval_skills {
            Some(naval) => {
                writer.write_bool(true)?;
                writer.write_i32(naval.navigation)?;
                writer.write_i32(naval.naval_tactics)?;
                writer.write_i32(naval.naval_stewardship)?;
            }
            None => writer.write_bool(false)?,
        }

        writer.write_i32(hero.unlocked_perks.len() as i32)?;
        for perk in &hero.unlocked_perks {
            writer.write_string(perk)?;
        }

        match &hero.appearance {
            Some(bytes) => {
                writer.write_bool(true)?;
                writer.write_bytes(bytes)?;
            }
            None => writer.write_bool(false)?,
        }

        write_entity_id(&mut writer, hero.clan_id)?;
        write_entity_id(&mut writer, hero.party_id)?;
        write_entity_id(&mut writer, hero.fleet_id)?;
    }

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::id::TypeTag;

    #[test]
    fn round_trips_a_hero_with_naval_skills_and_appearance() {
        let config = SaveEngineConfig::default();
        let mut save = Save::new();
        let id = save.allocate_id(TypeTag::Hero);
        let mut hero = Hero {
            id,
            string_id: "hero_derthert".to_owned(),
            name: "Derthert".to_owned(),
            level: 25,
            gold: 50_000,
            ..Hero::default()
        };
        hero.skills.set(Skill::OneHanded, 150);
        hero.naval_skills = Some(NavalSkills {
            navigation: 10,
            naval_tactics: 20,
            naval_stewardship: 30,
        });
        hero.appearance = Some(vec![1, 2, 3, 4]);
        hero.unlocked_perks.insert("perk_one".to_owned());
        save.heroes.insert(id, hero.clone());

        let encoded = encode(&save).unwrap();
        let mut decoded = Save::new();
        decode(&encoded, &mut decoded, &config).unwrap();

        let round_tripped = &decoded.heroes[&id];
        assert_eq!(round_tripped.name, hero.name);
        assert_eq!(round_tripped.level, 25);
        assert_eq!(round_tripped.gold, 50_000);
        assert_eq!(round_tripped.skills.get(Skill::OneHanded), 150);
        assert_eq!(round_tripped.naval_skills, hero.naval_skills);
        assert_eq!(round_tripped.appearance, hero.appearance);
        assert_eq!(round_tripped.unlocked_perks, hero.unlocked_perks);
    }
}
