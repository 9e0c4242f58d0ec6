//! # llm-md
//!
//! Batch-convert extensionless HTML documents into LLM-friendly markdown.
//!
//! ## Features
//!
//! - Discovers files with no extension and no existing `.md` sibling
//! - One blocking chat-completion call per file, fixed instruction prompt
//! - Writes the model's response verbatim as `<name>.md`
//! - Per-file failure isolation: one bad file never aborts the run
//!
//! ## Quick Start
//!
//! ```no_run
//! use llm_md::{Config, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .root_dir("./docs")
//!     .api_key(std::env::var("OPENAI_API_KEY")?)
//!     .build()?;
//!
//! let stats = Pipeline::new(config)?.run()?;
//! stats.print_summary();
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library follows a pipeline architecture:
//! 1. **Selector**: lists the directory and computes the candidate set
//! 2. **Client**: submits one completion request per candidate
//! 3. **Writer**: persists each response as a sibling `.md` file

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod client;
mod config;
mod error;
mod file;
mod pipeline;
mod selector;
mod writer;

pub use client::{Completion, CompletionClient, OpenAiClient};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineStats};
pub use selector::Selector;

/// Runs the complete conversion pipeline with the given configuration.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The HTTP client cannot be constructed
/// - The directory cannot be listed
///
/// Per-file conversion failures do not error; they are reported in the
/// returned statistics.
///
/// # Examples
///
/// ```no_run
/// use llm_md::{Config, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .root_dir("./docs")
///     .api_key("sk-...")
///     .build()?;
///
/// run(config)?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<PipelineStats> {
    Pipeline::new(config)?.run()
}
