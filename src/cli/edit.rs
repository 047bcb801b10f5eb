use std::{
    io::{Read as _, Write as _},
    path::PathBuf,
};

use clap::{Args, ValueEnum};

use campaign_save::cancel::CancellationToken;
use campaign_save::codec::LoadOptions;
use campaign_save::config::SaveEngineConfig;
use campaign_save::domain::Save;
use campaign_save::pipeline::{self, events::EventBus, SaveOptions};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// The path to the save file to edit, e.g. ".../Campaign_01.sav".
    #[arg(index = 1)]
    pub save_file: PathBuf,

    /// The name of the text editor to use.
    #[arg(short, long, default_value = "code --wait")]
    pub editor: String,

    /// The format to edit the save in.
    #[arg(short, long, default_value_t = Format::Json)]
    #[clap(value_enum)]
    pub format: Format,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum Format {
    Json,
    Ron,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Format::Json => "json",
            Format::Ron => "ron",
        })
    }
}

pub fn run(args: &EditArgs) -> anyhow::Result<()> {
    let config = SaveEngineConfig::default();
    let cancel = CancellationToken::new();
    let events = EventBus::new();

    let mut save = campaign_save::codec::load(
        &args.save_file,
        &LoadOptions::default(),
        &config,
        &cancel,
    )?;

    let (as_string, extension) = match args.format {
        Format::Ron => (
            ron::ser::to_string_pretty(&save, ron::ser::PrettyConfig::default())?,
            "ron",
        ),
        Format::Json => (serde_json::to_string_pretty(&save)?, "json"),
    };

    let prefix = format!(
        "{}.",
        args.save_file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("save"),
    );
    let suffix = format!(".{extension}");
    let mut temp_file = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(&suffix)
        .tempfile()?;
    temp_file.write_all(as_string.as_bytes())?;
    temp_file.flush()?;

    let (editor, editor_args) = {
        let mut parts = args.editor.split_whitespace();
        let editor = parts.next().unwrap();
        let editor_args = parts.collect::<Vec<_>>();
        (editor, editor_args)
    };
    let mut command = std::process::Command::new(editor);
    command.args(editor_args);

    println!("Waiting for editor to close...");
    command.arg(temp_file.path()).status()?;
    println!("Editor closed");

    let mut modified_string = String::new();
    temp_file.reopen()?.read_to_string(&mut modified_string)?;

    let modified: Save = match args.format {
        Format::Ron => ron::de::from_str(&modified_string)?,
        Format::Json => serde_json::from_str(&modified_string)?,
    };
    save = modified;

    pipeline::save(
        &mut save,
        &args.save_file,
        &SaveOptions::default(),
        &config,
        &cancel,
        &events,
    )?;

    println!("Save file successfully edited");

    Ok(())
}
