//! Configuration loading and the provider factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use drill_core::evaluator::EvaluationSettings;
use drill_core::feedback::UnknownHeaderPolicy;
use drill_core::session::GenerationSettings;
use drill_core::traits::LlmProvider;

use crate::mock::MockProvider;
use crate::openai::OpenAiProvider;

/// Name of the dotenv-style key file looked up in the data directory.
pub const ENV_FILE: &str = "config.env";
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Which backend answers chat-completion requests.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    OpenAI {
        #[serde(default)]
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    /// Canned replies, served in order. For offline use and tests.
    Mock {
        #[serde(default)]
        responses: Vec<String>,
    },
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig::OpenAI {
            api_key: String::new(),
            base_url: None,
            org_id: None,
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            ProviderConfig::Mock { responses } => f
                .debug_struct("Mock")
                .field("responses", &responses.len())
                .finish(),
        }
    }
}

/// Top-level drill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Model used to generate problems.
    #[serde(default = "default_model")]
    pub generation_model: String,
    /// Model used to grade solutions and answer follow-ups.
    #[serde(default = "default_model")]
    pub evaluation_model: String,
    #[serde(default = "default_generation_temperature")]
    pub generation_temperature: f64,
    /// 0.0 keeps grading deterministic.
    #[serde(default)]
    pub evaluation_temperature: f64,
    /// Where `history-progress/` and `problems/` live.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Strip code fences from generated problems before saving.
    #[serde(default)]
    pub clean_output: bool,
    /// Handling of unexpected bold headings in grading replies.
    #[serde(default)]
    pub unknown_headers: UnknownHeaderPolicy,
}

fn default_model() -> String {
    "gpt-4o".to_string()
}
fn default_generation_temperature() -> f64 {
    0.7
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            generation_model: default_model(),
            evaluation_model: default_model(),
            generation_temperature: default_generation_temperature(),
            evaluation_temperature: 0.0,
            data_dir: default_data_dir(),
            clean_output: false,
            unknown_headers: UnknownHeaderPolicy::default(),
        }
    }
}

impl DrillConfig {
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            model: self.generation_model.clone(),
            temperature: self.generation_temperature,
            clean_output: self.clean_output,
        }
    }

    pub fn evaluation_settings(&self) -> EvaluationSettings {
        EvaluationSettings {
            model: self.evaluation_model.clone(),
            temperature: self.evaluation_temperature,
            unknown_headers: self.unknown_headers,
        }
    }

    /// False when the OpenAI provider has no key; every model call will fail.
    pub fn has_api_key(&self) -> bool {
        match &self.provider {
            ProviderConfig::OpenAI { api_key, .. } => !api_key.trim().is_empty(),
            ProviderConfig::Mock { .. } => true,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Read a dotenv file into a map without touching the process environment.
/// A missing file is an empty map.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let vars = dotenvy::from_path_iter(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .collect::<Result<HashMap<_, _>, _>>()
        .with_context(|| format!("failed to parse {}", path.display()))?;
    debug!(path = %path.display(), vars = vars.len(), "read env file");
    Ok(vars)
}

/// Pick the API key: process environment first, then the configured value,
/// then the env file.
fn resolve_api_key(
    configured: &str,
    from_env: Option<String>,
    env_file: &HashMap<String, String>,
) -> String {
    if let Some(key) = from_env.filter(|k| !k.trim().is_empty()) {
        return key;
    }
    let configured = resolve_env_vars(configured);
    if !configured.trim().is_empty() {
        return configured;
    }
    env_file.get(API_KEY_VAR).cloned().unwrap_or_default()
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `drill.toml` in the current directory
/// 2. `~/.config/drill/config.toml`
///
/// `OPENAI_API_KEY` in the environment overrides the configured key; a
/// `config.env` file in the data directory is the last resort.
pub fn load_config() -> Result<DrillConfig> {
    load_config_from(None, None)
}

/// Load config from an explicit path, or search the default locations.
///
/// `data_dir` replaces the configured data directory before the key file is
/// looked up.
pub fn load_config_from(path: Option<&Path>, data_dir: Option<&Path>) -> Result<DrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("drill.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<DrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => DrillConfig::default(),
    };

    config.data_dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => PathBuf::from(resolve_env_vars(&config.data_dir.to_string_lossy())),
    };

    if let ProviderConfig::OpenAI {
        api_key, base_url, ..
    } = &mut config.provider
    {
        let env_file = read_env_file(&config.data_dir.join(ENV_FILE))?;
        *api_key = resolve_api_key(api_key, std::env::var(API_KEY_VAR).ok(), &env_file);
        *base_url = base_url.as_ref().map(|u| resolve_env_vars(u));
    }

    let source = config_path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    info!(%source, provider = ?config.provider, "configuration loaded");

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("drill"))
}

/// Create a provider instance from its configuration.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn LlmProvider>> {
    match config {
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Ok(Box::new(OpenAiProvider::new(
            api_key,
            base_url.clone(),
            org_id.clone(),
        )?)),
        ProviderConfig::Mock { responses } => Ok(Box::new(MockProvider::new(responses.clone()))),
    }
}
