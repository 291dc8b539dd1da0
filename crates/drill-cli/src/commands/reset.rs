//! The `drill reset` command.

use std::path::Path;

use anyhow::Result;
use tracing::info;

pub fn execute(config: Option<&Path>, data_dir: Option<&Path>) -> Result<()> {
    let data = super::open_data_dir(config, data_dir)?;
    match data.load_progress()? {
        Some(progress) => {
            data.save_progress(None)?;
            info!(parts = progress.current_part, "multi-part progress cleared");
            println!(
                "Cleared multi-part progress ({} part(s) generated).",
                progress.current_part
            );
        }
        None => println!("No multi-part problem in progress."),
    }
    Ok(())
}
