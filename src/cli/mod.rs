//! Debug CLI over the save engine: inspect a save's
//! header/metadata without decompressing the body, run the validator and
//! print its report, or round-trip a save through `$EDITOR` as JSON/RON.

pub mod edit;
pub mod load_info;
pub mod validate;

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Subcommands {
    LoadInfo(load_info::LoadInfoArgs),
    Validate(validate::ValidateArgs),
    Edit(edit::EditArgs),
}

pub fn run(subcommand: &Subcommands) -> anyhow::Result<()> {
    match subcommand {
        Subcommands::LoadInfo(args) => load_info::run(args)?,
        Subcommands::Validate(args) => validate::run(args)?,
        Subcommands::Edit(args) => edit::run(args)?,
    }

    Ok(())
}
