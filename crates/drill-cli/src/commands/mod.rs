pub mod evaluate;
pub mod init;
pub mod menu;
pub mod reset;
pub mod review;
pub mod stats;

use std::path::Path;

use anyhow::Result;
use tracing::warn;

use drill_core::evaluator::EvaluationSettings;
use drill_core::session::Session;
use drill_core::store::DataDir;
use drill_core::traits::LlmProvider;
use drill_providers::{create_provider, load_config_from};

/// Everything a command needs: the loaded config, a provider and the session.
pub struct App {
    pub provider: Box<dyn LlmProvider>,
    pub session: Session,
    pub evaluation: EvaluationSettings,
}

impl App {
    pub fn load(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        let config = load_config_from(config_path, data_dir)?;
        if !config.has_api_key() {
            warn!("OPENAI_API_KEY is not set; model calls will fail until it is");
        }

        let provider = create_provider(&config.provider)?;
        let session = Session::open(
            DataDir::new(&config.data_dir),
            config.generation_settings(),
        )?;

        Ok(Self {
            provider,
            session,
            evaluation: config.evaluation_settings(),
        })
    }
}

/// Open just the data directory, for commands that never call the model.
pub fn open_data_dir(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<DataDir> {
    let config = load_config_from(config_path, data_dir)?;
    let data = DataDir::new(&config.data_dir);
    data.init()?;
    Ok(data)
}
