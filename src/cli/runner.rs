use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use clap::Parser;
use std::path::Path;

use super::{Cli, Commands};
use crate::cli_cmds::*;
use crate::colormap::Colormap;
use crate::config::Config;
use crate::wallpaper::ColorIndex;

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let db_path = cli
        .db
        .map(|p| crate::utils::expand_tilde(&p))
        .unwrap_or_else(|| config.database_path());

    match cli.command {
        Commands::Update { paths, recursive } => {
            cmd_update(&open_index(&db_path)?, &paths, recursive || config.index.recursive)?;
        }
        Commands::Apply { at, dry_run } => {
            let index = open_index(&db_path)?;
            let ramp = Colormap::viridis();
            let setter = config.setter();
            cmd_apply(&index, &ramp, &setter, time_or_now(at), dry_run)?;
        }
        Commands::Color { at } => {
            cmd_color(&Colormap::viridis(), time_or_now(at));
        }
        Commands::Preview { at, limit } => {
            let index = open_index(&db_path)?;
            cmd_preview(&index, &Colormap::viridis(), time_or_now(at), limit)?;
        }
        Commands::List { json } => {
            cmd_list(&open_index(&db_path)?, json)?;
        }
    }

    Ok(())
}

/// The index is owned by the calling command and closed when it returns.
fn open_index(path: &Path) -> Result<ColorIndex> {
    ColorIndex::open(path)
        .with_context(|| format!("Failed to open wallpaper index {}", path.display()))
}

fn time_or_now(at: Option<NaiveTime>) -> NaiveTime {
    at.unwrap_or_else(|| Local::now().time())
}
