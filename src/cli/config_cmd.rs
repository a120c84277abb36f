use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use solsight::config::{Config, DEFAULT_CONFIG_TEMPLATE};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the config file path
    Path,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> Result<()> {
    match args.command {
        ConfigCommands::Show => {
            let config = Config::load(config_path)?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigCommands::Init { force } => {
            let path = Config::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            tokio::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigCommands::Path => {
            println!("{}", Config::config_path()?.display());
        }
    }
    Ok(())
}
