use std::path::PathBuf;

use clap::{Args, ValueEnum};

use campaign_save::cancel::CancellationToken;
use campaign_save::codec::LoadOptions;
use campaign_save::config::SaveEngineConfig;
use campaign_save::validator::{self, ValidationMode};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// The path to the save file, e.g. ".../Campaign_01.sav".
    #[arg(index = 1)]
    pub save_file: PathBuf,

    #[arg(short, long, default_value_t = Mode::Normal)]
    #[clap(value_enum)]
    pub mode: Mode,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum Mode {
    Strict,
    Normal,
    Permissive,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Mode::Strict => "strict",
            Mode::Normal => "normal",
            Mode::Permissive => "permissive",
        })
    }
}

impl From<Mode> for ValidationMode {
    fn from(mode: Mode) -> ValidationMode {
        match mode {
            Mode::Strict => ValidationMode::Strict,
            Mode::Normal => ValidationMode::Normal,
            Mode::Permissive => ValidationMode::Permissive,
        }
    }
}

pub fn run(args: &ValidateArgs) -> anyhow::Result<()> {
    let config = SaveEngineConfig::default();
    let cancel = CancellationToken::new();
    let save = campaign_save::codec::load(
        &args.save_file,
        &LoadOptions::default(),
        &config,
        &cancel,
    )?;

    let report = validator::validate(&save, args.mode.clone().into());
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_valid() {
        anyhow::bail!("{} error(s) found", report.errors.len());
    }

    Ok(())
}
