//! Segments `0x00A0`/`0x00A1`: fleets and ships, the optional naval
//! expansion. Only decoded when
//! [`Save::has_naval_expansion`](crate::domain::Save::has_naval_expansion)
//! is true; otherwise the codec routes these tags through the generic
//! passthrough path like any other unknown segment.

use std::io::Cursor;

use indexmap::IndexSet;

use crate::codec::error::SegmentError;
use crate::codec::wire::{read_entity_id, write_entity_id};
use crate::config::SaveEngineConfig;
use crate::domain::common::Position;
use crate::domain::fleet::{Fleet, FleetState, Formation};
use crate::domain::ship::{CargoStack, Ship, ShipClass, ShipUpgrade, UpgradeCategory, Weapon};
use crate::domain::Save;
use crate::io::{BinaryReader, BinaryWriter};

pub const FLEETS_TAG: u16 = 0x00A0;
pub const SHIPS_TAG: u16 = 0x00A1;

fn fleet_state_to_u8(s: FleetState) -> u8 {
    match s {
        FleetState::Sailing => 0,
        FleetState::Docked => 1,
        FleetState::Blockading => 2,
        FleetState::InNavalBattle => 3,
    }
}

fn fleet_state_from_u8(v: u8) -> Result<FleetState, SegmentError> {
    match v {
        0 => Ok(FleetState::Sailing),
        1 => Ok(FleetState::Docked),
        2 => Ok(FleetState::Blockading),
        3 => Ok(FleetState::InNavalBattle),
        other => Err(SegmentError::InvalidDiscriminant {
            field: "Fleet.state",
            value: other as u32,
        }),
    }
}

fn formation_to_u8(f: Formation) -> u8 {
    match f {
        Formation::Line => 0,
        Formation::Wedge => 1,
        Formation::Column => 2,
    }
}

fn formation_from_u8(v: u8) -> Result<Formation, SegmentError> {
    match v {
        0 => Ok(Formation::Line),
        1 => Ok(Formation::Wedge),
        2 => Ok(Formation::Column),
        other => Err(SegmentError::InvalidDiscriminant {
            field: "Fleet.formation",
            value: other as u32,
        }),
    }
}

fn ship_class_to_u8(c: ShipClass) -> u8 {
    match c {
        ShipClass::Standard => 0,
        ShipClass::Flagship => 1,
    }
}

fn ship_class_from_u8(v: u8) -> Result<ShipClass, SegmentError> {
    match v {
        0 => Ok(ShipClass::Standard),
        1 => Ok(ShipClass::Flagship),
        other => Err(SegmentError::InvalidDiscriminant {
            field: "Ship.class",
            value: other as u32,
        }),
    }
}

fn upgrade_category_to_u8(c: UpgradeCategory) -> u8 {
    match c {
        UpgradeCategory::Hull => 0,
        UpgradeCategory::Sails => 1,
        UpgradeCategory::Ram => 2,
        UpgradeCategory::Cargo => 3,
        UpgradeCategory::Crew => 4,
        UpgradeCategory::Combat => 5,
        UpgradeCategory::Navigation => 6,
    }
}

fn upgrade_category_from_u8(v: u8) -> Result<UpgradeCategory, SegmentError> {
    match v {
        0 => Ok(UpgradeCategory::Hull),
        1 => Ok(UpgradeCategory::Sails),
        2 => Ok(UpgradeCategory::Ram),
        3 => Ok(UpgradeCategory::Cargo),
        4 => Ok(UpgradeCategory::Crew),
        5 => Ok(UpgradeCategory::Combat),
        6 => Ok(UpgradeCategory::Navigation),
        other => Err(SegmentError::InvalidDiscriminant {
            field: "UpgradeCategory",
            value: other as u32,
        }),
    }
}

pub fn decode_fleets(
    payload: &[u8],
    save: &mut Save,
    config: &SaveEngineConfig,
) -> Result<(), SegmentError> {
    let mut reader = BinaryReader::new(Cursor::new(payload));
    let count = reader.read_i32()?.max(0);
    for _ in 0..count {
        let id = read_entity_id(&mut reader)?;
        let name = reader.read_string(config.max_string_bytes)?;
        let admiral_id = read_entity_id(&mut reader)?;
        let clan_id = read_entity_id(&mut reader)?;
        let state = fleet_state_from_u8({
            let mut b = [0u8; 1];
            reader.read_exact(&mut b)?;
            b[0]
        })?;
        let formation = formation_from_u8({
            let mut b = [0u8; 1];
            reader.read_exact(&mut b)?;
            b[0]
        })?;
        let morale = reader.read_i32()?;
        let gold = reader.read_i32()?;
        let food_supplies = reader.read_i32()?;
        let position = Position::new(reader.read_f32()?, reader.read_f32()?);
        let heading = reader.read_f32()?;
        let ship_count = reader.read_i32()?.max(0);
        let mut ships = Vec::with_capacity(ship_count as usize);
        for _ in 0..ship_count {
            ships.push(read_entity_id(&mut reader)?);
        }
        let flagship_id = read_entity_id(&mut reader)?;

        save.fleets.insert(
            id,
            Fleet {
                id,
                name,
                admiral_id,
                clan_id,
                state,
                formation,
                morale,
                gold,
                food_supplies,
                position,
                heading,
                ships,
                flagship_id,
            },
        );
    }
    Ok(())
}

pub fn encode_fleets(save: &Save) -> Result<Vec<u8>, SegmentError> {
    let mut buf = Vec::new();
    let mut writer = BinaryWriter::new(&mut buf);
    writer.write_i32(save.fleets.len() as i32)?;
    for fleet in save.fleets.values() {
        write_entity_id(&mut writer, fleet.id)?;
        writer.write_string(&fleet.name)?;
        write_entity_id(&mut writer, fleet.admiral_id)?;
        write_entity_id(&mut writer, fleet.clan_id)?;
        writer.write_exact(&[fleet_state_to_u8(fleet.state)])?;
        writer.write_exact(&[formation_to_u8(fleet.formation)])?;
        writer.write_i32(fleet.morale)?;
        writer.write_i32(fleet.gold)?;
        writer.write_i32(fleet.food_supplies)?;
        writer.write_f32(fleet.position.x)?;
        writer.write_f32(fleet.position.y)?;
        writer.write_f32(fleet.heading)?;
        writer.write_i32(fleet.ships.len() as i32)?;
        for ship_id in &fleet.ships {
            write_entity_id(&mut writer, *ship_id)?;
        }
        write_entity_id(&mut writer, fleet.flagship_id)?;
    }
    Ok(buf)
}

pub fn decode_ships(
    payload: &[u8],
    save: &mut Save,
    config: &SaveEngineConfig,
) -> Result<(), SegmentError> {
    let mut reader = BinaryReader::new(Cursor::new(payload));
    let count = reader.read_i32()?.max(0);
    for _ in 0..count {
        let id = read_entity_id(&mut reader)?;
        let name = reader.read_string(config.max_string_bytes)?;
        let ship_type = reader.read_string(config.max_string_bytes)?;
        let class = ship_class_from_u8({
            let mut b = [0u8; 1];
            reader.read_exact(&mut b)?;
            b[0]
        })?;
        let current_hull = reader.read_i32()?;
        let max_hull = reader.read_i32()?;
        let crew_count = reader.read_i32()?;
        let crew_capacity = reader.read_i32()?;
        let crew_quality = reader.read_i32()?;
        let crew_morale = reader.read_i32()?;
        let cargo_capacity = reader.read_f32()?;

        let cargo_count = reader.read_i32()?.max(0);
        let mut cargo = Vec::with_capacity(cargo_count as usize);
        for _ in 0..cargo_count {
            cargo.push(CargoStack {
                item_id: reader.read_string(config.max_string_bytes)?,
                item_name: reader.read_string(config.max_string_bytes)?,
                count: reader.read_i32()?,
                unit_weight: reader.read_f32()?,
            });
        }

        let weapon_count = reader.read_i32()?.max(0);
        let mut weapons = Vec::with_capacity(weapon_count as usize);
        for _ in 0..weapon_count {
            weapons.push(Weapon {
                id: reader.read_string(config.max_string_bytes)?,
                name: reader.read_string(config.max_string_bytes)?,
                damage: reader.read_i32()?,
            });
        }

        let upgrade_count = reader.read_i32()?.max(0);
        let mut upgrades = IndexSet::new();
        let mut upgrade_details = Vec::with_capacity(upgrade_count as usize);
        for _ in 0..upgrade_count {
            let upgrade_id = reader.read_string(config.max_string_bytes)?;
            let upgrade_name = reader.read_string(config.max_string_bytes)?;
            let category = upgrade_category_from_u8({
                let mut b = [0u8; 1];
                reader.read_exact(&mut b)?;
                b[0]
            })?;
            upgrades.insert(category);
            upgrade_details.push(ShipUpgrade {
                id: upgrade_id,
                name: upgrade_name,
                category,
            });
        }

        let fleet_id = read_entity_id(&mut reader)?;

        save.ships.insert(
            id,
            Ship {
                id,
                name,
                ship_type,
                class,
                current_hull,
                max_hull,
                crew_count,
                crew_capacity,
                crew_quality,
                crew_morale,
                cargo_capacity,
                cargo,
                weapons,
                upgrades,
                upgrade_details,
                fleet_id,
            },
        );
    }
    Ok(())
}

pub fn encode_ships(save: &Save) -> Result<Vec<u8>, SegmentError> {
    let mut buf = Vec::new();
    let mut writer = BinaryWriter::new(&mut buf);
    writer.write_i32(save.ships.len() as i32)?;
    for ship in save.ships.values() {
        write_entity_id(&mut writer, ship.id)?;
        writer.write_string(&ship.name)?;
        writer.write_string(&ship.ship_type)?;
        writer.write_exact(&[ship_class_to_u8(ship.class)])?;
        writer.write_i32(ship.current_hull)?;
        writer.write_i32(ship.max_hull)?;
        writer.write_i32(ship.crew_count)?;
        writer.write_i32(ship.crew_capacity)?;
        writer.write_i32(ship.crew_quality)?;
        writer.write_i32(ship.crew_morale)?;
        writer.write_f32(ship.cargo_capacity)?;

        writer.write_i32(ship.cargo.len() as i32)?;
        for stack in &ship.cargo {
            writer.write_string(&stack.item_id)?;
            writer.write_string(&stack.item_name)?;
            writer.write_i32(stack.count)?;
            writer.write_f32(stack.unit_weight)?;
        }

        writer.write_i32(ship.weapons.len() as i32)?;
        for weapon in &ship.weapons {
            writer.write_string(&weapon.id)?;
            writer.write_string(&weapon.name)?;
            writer.write_i32(weapon.damage)?;
        }

        writer.write_i32(ship.upgrade_details.len() as i32)?;
        for upgrade in &ship.upgrade_details {
            writer.write_string(&upgrade.id)?;
            writer.write_string(&upgrade.name)?;
            writer.write_exact(&[upgrade_category_to_u8(upgrade.category)])?;
        }

        write_entity_id(&mut writer, ship.fleet_id)?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::id::TypeTag;

    #[test]
    fn round_trips_a_fleet_with_a_flagship() {
        let config = SaveEngineConfig::default();
        let mut save = Save::new();
        let ship_id = save.allocate_id(TypeTag::Ship);
        let fleet_id = save.allocate_id(TypeTag::Fleet);

        let mut ship = Ship::default();
        ship.id = ship_id;
        ship.name = "Sea Serpent".to_owned();
        ship.fleet_id = fleet_id;
        save.ships.insert(ship_id, ship);

        let mut fleet = Fleet::default();
        fleet.id = fleet_id;
        fleet.name = "First Fleet".to_owned();
        fleet.ships.push(ship_id);
        fleet.flagship_id = ship_id;
        save.fleets.insert(fleet_id, fleet);

        let encoded_fleets = encode_fleets(&save).unwrap();
        let encoded_ships = encode_ships(&save).unwrap();

        let mut decoded = Save::new();
        decode_ships(&encoded_ships, &mut decoded, &config).unwrap();
        decode_fleets(&encoded_fleets, &mut decoded, &config).unwrap();

        let round_tripped = &decoded.fleets[&fleet_id];
        assert_eq!(round_tripped.name, "First Fleet");
        assert!(round_tripped.has_valid_flagship());
        assert_eq!(decoded.ships[&ship_id].name, "Sea Serpent");
    }
}
