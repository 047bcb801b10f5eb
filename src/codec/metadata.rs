//! Tolerant decode/encode of the envelope's metadata JSON object: unknown
//! keys are ignored, type-mismatched keys fall back to the entity's default
//! with a warning, nothing about metadata shape fails a load.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::save::Metadata;

/// Mirrors the recognized JSON keys; every field is optional on the wire.
#[derive(Deserialize)]
struct RawMetadata {
    #[serde(rename = "CharacterName")]
    character_name: Option<Value>,
    #[serde(rename = "MainHeroLevel")]
    main_hero_level: Option<Value>,
    #[serde(rename = "DayLong")]
    day_long: Option<Value>,
    #[serde(rename = "PlayTime")]
    play_time: Option<Value>,
    #[serde(rename = "ClanName")]
    clan_name: Option<Value>,
    #[serde(rename = "Gold")]
    gold: Option<Value>,
}

/// Decodes `json`, returning the best-effort [`Metadata`] plus one warning
/// string per field that was present but the wrong shape.
pub fn decode(json: &str) -> (Metadata, Vec<String>) {
    let mut warnings = Vec::new();

    let raw: RawMetadata = match serde_json::from_str(json) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "metadata JSON did not parse; using defaults");
            return (Metadata::default(), vec![format!("unparseable metadata JSON: {e}")]);
        }
    };

    let mut metadata = Metadata::default();

    if let Some(v) = raw.character_name {
        match v.as_str() {
            Some(s) => metadata.character_name = s.to_owned(),
            None => warnings.push("CharacterName was not a string; using default".to_owned()),
        }
    }
    if let Some(v) = raw.main_hero_level {
        match v.as_i64() {
            Some(n) => metadata.main_hero_level = n as i32,
            None => warnings.push("MainHeroLevel was not a number; using default".to_owned()),
        }
    }
    if let Some(v) = raw.day_long {
        match v.as_f64() {
            Some(n) => metadata.day = n as i32,
            None => warnings.push("DayLong was not a number; using default".to_owned()),
        }
    }
    if let Some(v) = raw.play_time {
        match v.as_i64() {
            Some(n) => metadata.play_time = n,
            None => warnings.push("PlayTime was not a number; using default".to_owned()),
        }
    }
    if let Some(v) = raw.clan_name {
        match v.as_str() {
            Some(s) => metadata.clan_name = s.to_owned(),
            None => warnings.push("ClanName was not a string; using default".to_owned()),
        }
    }
    if let Some(v) = raw.gold {
        match v.as_i64() {
            Some(n) => metadata.gold = n as i32,
            None => warnings.push("Gold was not a number; using default".to_owned()),
        }
    }

    (metadata, warnings)
}

pub fn encode(metadata: &Metadata) -> String {
    let value = serde_json::json!({
        "CharacterName": metadata.character_name,
        "MainHeroLevel": metadata.main_hero_level,
        "DayLong": metadata.day as f64,
        "PlayTime": metadata.play_time,
        "ClanName": metadata.clan_name,
        "Gold": metadata.gold,
    });
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_recognized_fields() {
        let json = r#"{"CharacterName":"Derthert","MainHeroLevel":25,"DayLong":12.9,"PlayTime":500,"ClanName":"House Derthert","Gold":50000,"UnknownField":true}"#;
        let (metadata, warnings) = decode(json);
        assert!(warnings.is_empty());
        assert_eq!(metadata.character_name, "Derthert");
        assert_eq!(metadata.main_hero_level, 25);
        assert_eq!(metadata.day, 12);
        assert_eq!(metadata.play_time, 500);
        assert_eq!(metadata.clan_name, "House Derthert");
        assert_eq!(metadata.gold, 50000);
    }

    #[test]
    fn type_mismatch_falls_back_to_default_with_warning() {
        let json = r#"{"Gold":"not a number"}"#;
        let (metadata, warnings) = decode(json);
        assert_eq!(metadata.gold, 0);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn unparseable_json_falls_back_entirely() {
        let (metadata, warnings) = decode("not json");
        assert_eq!(metadata.character_name, "");
        assert_eq!(warnings.len(), 1);
    }
}
