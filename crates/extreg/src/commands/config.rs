//! Config command

use anyhow::Result;
use camino::Utf8Path;

use crate::cli::{ConfigCommands, ConfigShowArgs};
use crate::commands::load_config;

pub fn run(cmd: ConfigCommands, config_path: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => show(args, config_path),
    }
}

fn show(args: ConfigShowArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config_path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print!("{}", serde_yaml_ng::to_string(&config)?);
    }

    Ok(())
}
