//! `repo-archiver config` — show the effective configuration.

use anyhow::{Context, Result};
use clap::Subcommand;

use archiver_core::config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the loaded configuration as YAML.
    Show,
    /// Print the config file location.
    Path,
}

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            let cfg = config::load().context("failed to load configuration")?;
            print!("{}", cfg.to_yaml().context("failed to render configuration")?);
        }
        ConfigCommand::Path => {
            let home = dirs::home_dir().context("could not determine home directory")?;
            println!("{}", config::config_path_at(&home).display());
        }
    }
    Ok(())
}
