use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

mod backend;
mod cli;
mod clipboard;
mod commands;
mod config;
mod dispatch;
mod mime;
mod multipart;
mod payload;
mod prefs;
mod upload;

mod error;
pub(crate) use error::{AppError, AppResult};

pub(crate) mod types;

#[cfg(test)]
mod testing;

use backend::BackendRegistry;
use cli::{Cli, Command};
use config::Config;
use payload::DropItem;
use prefs::{BackendSelection, PreferenceStore};

pub struct App {
    pub config: Config,
    pub selection: Arc<BackendSelection>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match (cli.config, config::default_path()) {
        (Some(path), _) => {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            Config::load(&path)?
        }
        (None, Some(path)) => Config::load(&path)?,
        (None, None) => Config::default(),
    };

    init_logging(&config.log);

    let registry = BackendRegistry::from_config(&config).context("invalid backend list")?;
    let store = match cli.preferences {
        Some(path) => PreferenceStore::new(path),
        None => PreferenceStore::user().context("could not locate the preference directory")?,
    };
    let selection = Arc::new(
        BackendSelection::load(registry, store).context("failed to load preferences")?,
    );

    let app = App { config, selection };

    let all_ok = match cli.command {
        Command::Upload { paths, json } => {
            let items = paths.into_iter().map(DropItem::from_path).collect();
            commands::upload::run(&app, items, json).await?
        }
        Command::Paste { text, json } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin().await?,
            };
            if text.is_empty() {
                bail!("nothing to paste");
            }
            commands::upload::run(&app, vec![DropItem::Text(text)], json).await?
        }
        Command::Backend { action } => {
            commands::backend::run(&app, action)?;
            true
        }
    };

    if !all_ok {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(config: &config::Log) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn read_stdin() -> anyhow::Result<String> {
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("failed to read stdin")?;
    Ok(text)
}
