use crate::error::{Error, Result};
use std::path::PathBuf;

const DEFAULT_MODEL: &str = "gpt-4.1";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Instruction block sent ahead of each document.
///
/// The wording targets the fluxui component docs this tool was built for:
/// pages are HTML with heavy navigation chrome, and the text worth keeping
/// lives inside the `[grid-area:main]` block.
const DEFAULT_INSTRUCTIONS: &str = "Could you convert all of the documents in this directory to be\n\
well-formatted markdown which an LLM can read to help me use this\n\
livewire fluxui component library?  They are all in html with a lot of\n\
wrapping content.  The main text of the instructions for each component\n\
seem to be inside the `<div class=\"[grid-area:main]` block however.  I\n\
want the text of the instructions and the code examples so that I can\n\
help guide an LLM to help me later.  Please respond with only the markdown rewrite - no other chat or commentary.";

/// Configuration for the llm-md pipeline.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Directory to scan for unconverted files
    pub root_dir: PathBuf,

    /// Completion model identifier
    pub model: String,

    /// Base URL of the chat-completion API
    pub api_base: String,

    /// API key, threaded in explicitly so nothing below the CLI reads the
    /// environment
    pub api_key: String,

    /// Instruction block prepended to each document before the API call
    pub instructions: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Dry run mode (list candidates, no API calls, no file writes)
    pub dry_run: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use llm_md::Config;
    ///
    /// let config = Config::builder()
    ///     .root_dir(".")
    ///     .api_key("sk-test")
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Root directory doesn't exist or is not a directory
    /// - Model identifier or API base URL is empty
    /// - API key is empty
    pub fn validate(&self) -> Result<()> {
        if !self.root_dir.exists() {
            return Err(Error::config(format!(
                "Directory does not exist: {}",
                self.root_dir.display()
            )));
        }

        if !self.root_dir.is_dir() {
            return Err(Error::config(format!(
                "Path is not a directory: {}",
                self.root_dir.display()
            )));
        }

        if self.model.is_empty() {
            return Err(Error::config("model must not be empty"));
        }

        if self.api_base.is_empty() {
            return Err(Error::config("api_base must not be empty"));
        }

        if self.api_key.is_empty() {
            return Err(Error::config(
                "API key must not be empty. Set OPENAI_API_KEY or pass --api-key.",
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            dry_run: false,
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    root_dir: Option<PathBuf>,
    model: Option<String>,
    api_base: Option<String>,
    api_key: Option<String>,
    instructions: Option<String>,
    timeout_secs: Option<u64>,
    dry_run: bool,
}

impl ConfigBuilder {
    /// Sets the directory to scan.
    #[must_use]
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(path.into());
        self
    }

    /// Sets the completion model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the base URL of the chat-completion API.
    #[must_use]
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    /// Sets the API key used to authenticate completion requests.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the instruction block prepended to each document.
    #[must_use]
    pub fn instructions(mut self, text: impl Into<String>) -> Self {
        self.instructions = Some(text.into());
        self
    }

    /// Sets the request timeout in seconds.
    #[must_use]
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Enables dry run mode (no API calls, no file writes).
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            root_dir: self.root_dir.unwrap_or_else(|| PathBuf::from(".")),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key: self.api_key.unwrap_or_default(),
            instructions: self
                .instructions
                .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            dry_run: self.dry_run,
        };

        config.validate()?;
        Ok(config)
    }
}
