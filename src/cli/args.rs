use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "walltime")]
#[command(version)]
#[command(about = "Time-of-day wallpaper picker that matches wallpapers to a color ramp")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Index database, overrides the config file
    #[arg(long, global = true)]
    pub(crate) db: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Add wallpapers to the color index
    ///
    /// Files that are already indexed keep their stored color, even if the
    /// image has changed since.
    Update {
        /// Image files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Descend into subdirectories
        #[arg(short, long)]
        recursive: bool,
    },
    /// Set the wallpaper that best matches the time of day
    Apply {
        /// Time to match instead of now (HH:MM)
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveTime>,

        /// Print the chosen wallpaper without changing the background
        #[arg(short = 'n', long)]
        dry_run: bool,
    },
    /// Show the target color for a time of day
    Color {
        /// Time to show instead of now (HH:MM)
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveTime>,
    },
    /// List the wallpapers closest to the target color
    Preview {
        /// Time to match instead of now (HH:MM)
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveTime>,

        /// Maximum number of wallpapers to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// List indexed wallpapers
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub(crate) fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| format!("expected HH:MM (e.g. 18:30): {e}"))
}
