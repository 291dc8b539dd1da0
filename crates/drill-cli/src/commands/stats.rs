//! The `drill stats` command.

use std::path::Path;

use anyhow::Result;

use drill_core::difficulty::{self, TierCounts};
use drill_core::model::Difficulty;

use crate::display;

pub fn execute(config: Option<&Path>, data_dir: Option<&Path>) -> Result<()> {
    let data = super::open_data_dir(config, data_dir)?;
    let history = data.load_history()?;
    let progress = data.load_progress()?;

    // Each run starts at Easy, so this is where the first automatic pick lands.
    let next = difficulty::advance(Difficulty::Easy, &history);

    println!("{}", display::tier_table(&TierCounts::from_history(&history), next));
    println!("{}", display::progress_summary(progress.as_ref()));
    Ok(())
}
