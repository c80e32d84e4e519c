use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::utils;
use crate::wallpaper::{self, ColorIndex};

pub fn cmd_update(index: &ColorIndex, inputs: &[PathBuf], recursive: bool) -> Result<()> {
    let paths = utils::collect_image_paths(inputs, recursive);
    if paths.is_empty() {
        eprintln!("No images found.");
        return Ok(());
    }

    let report = wallpaper::update_index(index, &paths).context("Failed to update index")?;

    println!(
        "Indexed {} new wallpaper(s), {} already indexed, {} failed ({} total).",
        report.added.len(),
        report.skipped,
        report.failed.len(),
        index.size()?
    );
    for (path, err) in &report.failed {
        eprintln!("  {}: {}", path.display(), err);
    }

    Ok(())
}

pub fn cmd_list(index: &ColorIndex, json: bool) -> Result<()> {
    let records = index.all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for record in &records {
        let fp = &record.fingerprint;
        println!(
            "{:>7.2} {:>7.2} {:>7.2}  {}",
            fp.l, fp.a, fp.b, record.identifier
        );
    }
    println!("{} wallpaper(s) indexed.", records.len());

    Ok(())
}
