//! The `drill init` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use drill_core::store::DataDir;

pub fn execute(data_dir: Option<&Path>) -> Result<()> {
    if Path::new("drill.toml").exists() {
        println!("drill.toml already exists, skipping.");
    } else {
        std::fs::write("drill.toml", SAMPLE_CONFIG)?;
        println!("Created drill.toml");
    }

    let root = data_dir.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
    let data = DataDir::new(&root);
    data.init()?;
    println!("Initialized data directory at {}", root.display());

    println!("\nNext steps:");
    println!("  1. Export OPENAI_API_KEY or put it in config.env");
    println!("  2. Run: drill");

    Ok(())
}

pub const SAMPLE_CONFIG: &str = r#"# drill configuration

generation_model = "gpt-4o"
evaluation_model = "gpt-4o"
generation_temperature = 0.7
evaluation_temperature = 0.0
data_dir = "."

# Strip code fences from generated problems before saving.
clean_output = false

# Bold headings other than the three rubric sections: "drop" or "attach".
unknown_headers = "drop"

[provider]
type = "openai"
api_key = "${OPENAI_API_KEY}"
# base_url = "https://api.openai.com"
"#;
