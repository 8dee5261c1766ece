use std::path::PathBuf;

use anyhow::Result;
use campus_events_core::config::CampusConfig;
use owo_colors::OwoColorize;

pub fn run(
    mut config: CampusConfig,
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
) -> Result<()> {
    let config_path = CampusConfig::config_path()?;

    if apply_changes(&mut config, data_dir, log_level) {
        config.save()?;
        println!("{}", format!("Saved {}", config_path.display()).green());
        println!();
    }

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", config.data_path().display());
    println!();
    println!("{}", "Logging".bold());
    println!("  Level:   {} (override with RUST_LOG)", config.log_level);

    Ok(())
}

/// Returns true if anything changed.
fn apply_changes(
    config: &mut CampusConfig,
    data_dir: Option<PathBuf>,
    log_level: Option<String>,
) -> bool {
    let mut changed = false;

    if let Some(dir) = data_dir.filter(|d| *d != config.data_dir) {
        config.data_dir = dir;
        changed = true;
    }
    if let Some(level) = log_level.filter(|l| *l != config.log_level) {
        config.log_level = level;
        changed = true;
    }

    changed
}
