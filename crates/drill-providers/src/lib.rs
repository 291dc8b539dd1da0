//! drill-providers: chat-completion backends and configuration.
//!
//! Implements the `LlmProvider` trait for OpenAI-compatible endpoints and a
//! scripted mock, and loads `drill.toml`.

pub mod config;
pub mod mock;
pub mod openai;

pub use config::{create_provider, load_config, load_config_from, DrillConfig, ProviderConfig};
pub use drill_core::error::ProviderError;
