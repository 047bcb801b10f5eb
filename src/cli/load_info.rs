use std::path::PathBuf;

use clap::Args;

use campaign_save::config::SaveEngineConfig;

#[derive(Debug, Args)]
pub struct LoadInfoArgs {
    /// The path to the save file, e.g. ".../Campaign_01.sav".
    #[arg(index = 1)]
    pub save_file: PathBuf,
}

pub fn run(args: &LoadInfoArgs) -> anyhow::Result<()> {
    let config = SaveEngineConfig::default();
    let info = campaign_save::codec::load_info(&args.save_file, &config)?;
    println!("{}", serde_json::to_string_pretty(&SaveInfoJson::from(&info))?);
    Ok(())
}

/// `SaveInfo` doesn't derive `Serialize` itself (it's not part of the
/// on-disk format), so the CLI mirrors its fields here for pretty-printing.
#[derive(serde::Serialize)]
struct SaveInfoJson {
    path: String,
    file_size: u64,
    last_modified: Option<chrono::DateTime<chrono::Utc>>,
    game_version: String,
    header_version: i32,
    module_ids: Vec<String>,
    has_naval_expansion: bool,
    character_name: String,
    level: i32,
    day: i32,
    play_time: i64,
    clan_name: String,
    gold: i32,
}

impl From<&campaign_save::codec::SaveInfo> for SaveInfoJson {
    fn from(info: &campaign_save::codec::SaveInfo) -> SaveInfoJson {
        SaveInfoJson {
            path: info.path.display().to_string(),
            file_size: info.file_size,
            last_modified: info.last_modified,
            game_version: info.header.game_version.clone(),
            header_version: info.header.header_version,
            module_ids: info.module_ids.clone(),
            has_naval_expansion: info.has_naval_expansion,
            character_name: info.character_name.clone(),
            level: info.level,
            day: info.day,
            play_time: info.play_time,
            clan_name: info.clan_name.clone(),
            gold: info.gold,
        }
    }
}
