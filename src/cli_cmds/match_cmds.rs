use anyhow::{Context, Result};
use chrono::NaiveTime;
use std::path::Path;
use tracing::info;

use crate::colormap::Colormap;
use crate::setter::Setter;
use crate::wallpaper::ColorIndex;
use crate::{matcher, timeprofile};

pub fn cmd_apply(
    index: &ColorIndex,
    ramp: &Colormap,
    setter: &Setter,
    time: NaiveTime,
    dry_run: bool,
) -> Result<()> {
    let target = timeprofile::color_for_time(&time, ramp);
    let records = index.all()?;
    let best = matcher::best_match(&target, &records)?;

    info!(
        time = %time.format("%H:%M"),
        wallpaper = %best.identifier,
        distance = target.distance(&best.fingerprint),
        "picked wallpaper"
    );

    if !dry_run {
        setter
            .apply(Path::new(&best.identifier))
            .context("Failed to set background")?;
    }
    println!("{}", best.identifier);

    Ok(())
}

pub fn cmd_color(ramp: &Colormap, time: NaiveTime) {
    let minutes = timeprofile::minutes_of_day(&time);
    let ramp_index = timeprofile::ramp_index_for_minutes(minutes);
    let rgb = timeprofile::display_color_for_time(&time, ramp);
    let target = timeprofile::color_for_time(&time, ramp);

    println!("Time:   {}", time.format("%H:%M"));
    println!("Ramp:   {} [{}]", ramp.name(), ramp_index);
    println!("RGB:    #{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue);
    println!(
        "Lab:    L {:.2}  a {:.2}  b {:.2}",
        target.l, target.a, target.b
    );
}

pub fn cmd_preview(
    index: &ColorIndex,
    ramp: &Colormap,
    time: NaiveTime,
    limit: usize,
) -> Result<()> {
    let target = timeprofile::color_for_time(&time, ramp);
    let records = index.all()?;
    if records.is_empty() {
        return Err(matcher::EmptyIndexError.into());
    }

    println!(
        "Closest wallpapers for {} (L {:.1}, a {:.1}, b {:.1}):",
        time.format("%H:%M"),
        target.l,
        target.a,
        target.b
    );
    for (record, distance) in matcher::rank(&target, &records, limit) {
        println!("  {:>7.2}  {}", distance, record.identifier);
    }

    Ok(())
}
