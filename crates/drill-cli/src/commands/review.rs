//! The `drill review` command.

use std::path::Path;

use anyhow::Result;

use crate::display;

pub fn execute(config: Option<&Path>, data_dir: Option<&Path>) -> Result<()> {
    let data = super::open_data_dir(config, data_dir)?;
    let history = data.load_history()?;

    if history.is_empty() {
        println!("No problems to review.");
        return Ok(());
    }
    for (idx, entry) in history.iter().enumerate() {
        println!("{}", display::problem_entry(idx + 1, entry));
    }
    Ok(())
}
