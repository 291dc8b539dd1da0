//! drill-core: problem model, prompts, persistence and feedback parsing.
//!
//! This crate holds everything the drill CLI does apart from talking to a
//! concrete model endpoint and reading the console: the data model, prompt
//! templates, the difficulty policy, slug/file naming, the JSON stores and
//! the `Session` state object that ties them together.

pub mod difficulty;
pub mod error;
pub mod evaluator;
pub mod feedback;
pub mod model;
pub mod prompt;
pub mod session;
pub mod slug;
pub mod store;
pub mod traits;
