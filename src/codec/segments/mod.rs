//! The segment registry: maps a `u16` tag to its decoder/encoder pair.
//! Unknown tags, and naval tags when the naval expansion isn't installed,
//! fall through to
//! [`Save::preserved_segments`](crate::domain::save::PreservedSegment) so an
//! unmutated save re-encodes byte-identical.

pub mod campaign_time;
pub mod heroes;
pub mod naval;
pub mod parties;
pub mod political;
pub mod quests;

use crate::codec::error::SegmentError;
use crate::config::SaveEngineConfig;
use crate::domain::save::PreservedSegment;
use crate::domain::Save;

/// Decodes one segment's payload, dispatching on `tag`. Unknown tags (and
/// naval tags when `has_naval_expansion` is false) are appended to
/// `save.preserved_segments` verbatim, preserving file order.
pub fn decode_segment(
    tag: u16,
    payload: &[u8],
    save: &mut Save,
    config: &SaveEngineConfig,
    has_naval_expansion: bool,
) -> Result<(), SegmentError> {
    let naval_tag = tag == naval::FLEETS_TAG || tag == naval::SHIPS_TAG;

    if naval_tag && !has_naval_expansion {
        save.preserved_segments.push(PreservedSegment {
            tag,
            bytes: payload.to_vec(),
        });
        return Ok(());
    }

    match tag {
        campaign_time::TAG => campaign_time::decode(payload, save),
        heroes::TAG => heroes::decode(payload, save, config),
        parties::TAG => parties::decode(payload, save, config),
        political::CLANS_TAG => political::decode_clans(payload, save, config),
        political::KINGDOMS_TAG => political::decode_kingdoms(payload, save, config),
        political::SETTLEMENTS_TAG => political::decode_settlements(payload, save, config),
        political::FACTIONS_TAG => political::decode_factions(payload, save, config),
        naval::FLEETS_TAG => naval::decode_fleets(payload, save, config),
        naval::SHIPS_TAG => naval::decode_ships(payload, save, config),
        quests::TAG => quests::decode(payload, save, config),
        _ => {
            save.preserved_segments.push(PreservedSegment {
                tag,
                bytes: payload.to_vec(),
            });
            Ok(())
        }
    }
}

/// Encodes every known segment type (in canonical tag order) followed by the
/// preserved passthrough segments in their original order.
pub fn encode_all(save: &Save) -> Result<Vec<(u16, Vec<u8>)>, SegmentError> {
    let mut out = Vec::new();

    out.push((campaign_time::TAG, campaign_time::encode(save)?));
    out.push((heroes::TAG, heroes::encode(save)?));
    out.push((parties::TAG, parties::encode(save)?));
    out.push((political::CLANS_TAG, political::encode_clans(save)?));
    out.push((political::KINGDOMS_TAG, political::encode_kingdoms(save)?));
    out.push((
        political::SETTLEMENTS_TAG,
        political::encode_settlements(save)?,
    ));
    out.push((political::FACTIONS_TAG, political::encode_factions(save)?));
    if !save.fleets.is_empty() || !save.ships.is_empty() {
        out.push((naval::FLEETS_TAG, naval::encode_fleets(save)?));
        out.push((naval::SHIPS_TAG, naval::encode_ships(save)?));
    }
    out.push((quests::TAG, quests::encode(save)?));

    for preserved in &save.preserved_segments {
        out.push((preserved.tag, preserved.bytes.clone()));
    }

    Ok(out)
}
