use crate::{
    client::{CompletionClient, OpenAiClient},
    config::Config,
    error::Result,
    file,
    selector::Selector,
    writer,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Statistics collected during a conversion run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Number of candidates the selector produced
    pub candidates: usize,

    /// Candidates converted and written successfully
    pub converted: usize,

    /// Candidates that failed at some step and were skipped over
    pub failed: usize,

    /// Candidates not attempted (dry run)
    pub skipped: usize,

    /// Total execution time
    pub duration: Duration,
}

impl PipelineStats {
    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔═══════════════════════════════════════╗");
        println!("║         Conversion Summary            ║");
        println!("╠═══════════════════════════════════════╣");
        println!("║ Candidates:       {:>8}            ║", self.candidates);
        println!("║ Converted:        {:>8}            ║", self.converted);
        println!("║ Failed:           {:>8}            ║", self.failed);
        println!("║ Skipped:          {:>8}            ║", self.skipped);
        println!(
            "║ Duration:         {:>8.2}s           ║",
            self.duration.as_secs_f64()
        );
        println!("╚═══════════════════════════════════════╝\n");
    }
}

/// Main orchestrator for the conversion run.
///
/// Candidates are processed strictly sequentially; a failure in one never
/// aborts the rest of the run.
pub struct Pipeline {
    config: Config,
    selector: Selector,
    client: Box<dyn CompletionClient>,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - The HTTP client cannot be constructed
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = Box::new(OpenAiClient::new(&config)?);
        Ok(Self::assemble(config, client))
    }

    /// Creates a pipeline with an injected completion client.
    ///
    /// This is the seam used by tests and by callers that bring their own
    /// provider.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn with_client(config: Config, client: Box<dyn CompletionClient>) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, client))
    }

    fn assemble(config: Config, client: Box<dyn CompletionClient>) -> Self {
        let selector = Selector::new(&config);
        Self {
            config,
            selector,
            client,
        }
    }

    /// Executes the conversion run and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Select**: list the directory and compute the candidate set
    /// 2. **Convert**: per candidate, read, call the completion API, write
    ///    the `.md` sibling; per-candidate errors are reported and the loop
    ///    continues
    ///
    /// # Errors
    ///
    /// Returns an error only if the directory cannot be listed. Per-file
    /// failures are counted in the statistics instead.
    #[instrument(skip(self), fields(root_dir = %self.config.root_dir.display()))]
    pub fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        info!(
            "Scanning {} for unconverted files",
            self.config.root_dir.display()
        );
        let candidates = self.selector.select()?;
        info!("Found {} candidate(s)", candidates.len());

        let mut converted = 0;
        let mut failed = 0;
        let mut skipped = 0;

        for name in &candidates {
            let path = self.config.root_dir.join(name);

            if self.config.dry_run {
                println!("Would process {}", path.display());
                skipped += 1;
                continue;
            }

            println!("Processing {}...", path.display());
            match self.convert(&path) {
                Ok(md_path) => {
                    println!("Wrote {}", md_path.display());
                    converted += 1;
                }
                Err(e) => {
                    println!("Error processing {}: {}", path.display(), e);
                    warn!("Conversion failed for {}: {}", path.display(), e);
                    failed += 1;
                }
            }
        }

        let stats = PipelineStats {
            candidates: candidates.len(),
            converted,
            failed,
            skipped,
            duration: start_time.elapsed(),
        };

        info!(
            "Run complete: {} converted, {} failed in {:.2}s",
            stats.converted,
            stats.failed,
            stats.duration.as_secs_f64()
        );

        Ok(stats)
    }

    /// Performs one conversion attempt: read, compose, invoke, write.
    fn convert(&self, path: &Path) -> Result<PathBuf> {
        let content = file::read_text(path)?;
        let prompt = format!("{}\n\n{}", self.config.instructions, content);
        let completion = self.client.complete(&prompt)?;
        writer::write_markdown(path, &completion.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Completion;
    use crate::error::Error;
    use assert_fs::prelude::*;
    use std::sync::{Arc, Mutex};

    /// Fake provider that records prompts and replays canned results.
    struct FakeClient {
        prompts: Mutex<Vec<String>>,
        results: Mutex<Vec<Result<Completion>>>,
    }

    impl FakeClient {
        fn with_results(results: Vec<Result<Completion>>) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                results: Mutex::new(results),
            }
        }

        fn ok(text: &str) -> Result<Completion> {
            Ok(Completion {
                text: text.to_string(),
            })
        }
    }

    impl CompletionClient for FakeClient {
        fn complete(&self, content: &str) -> Result<Completion> {
            self.prompts.lock().unwrap().push(content.to_string());
            let mut results = self.results.lock().unwrap();
            if results.is_empty() {
                return Err(Error::api("fake client exhausted"));
            }
            results.remove(0)
        }
    }

    fn test_config(root: &std::path::Path) -> Config {
        Config::builder()
            .root_dir(root)
            .api_key("test-key")
            .build()
            .unwrap()
    }

    #[test]
    fn test_successful_conversion_writes_response_verbatim() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("report").write_str("<html>body</html>").unwrap();

        let client = FakeClient::with_results(vec![FakeClient::ok("# Report\n\ncontent")]);
        let pipeline = Pipeline::with_client(test_config(temp.path()), Box::new(client)).unwrap();
        let stats = pipeline.run().unwrap();

        assert_eq!(stats.candidates, 1);
        assert_eq!(stats.converted, 1);
        assert_eq!(stats.failed, 0);
        temp.child("report.md").assert("# Report\n\ncontent");
    }

    /// Wrapper so a test can keep inspecting a fake after the pipeline
    /// takes ownership of the boxed client.
    struct SharedClient(Arc<FakeClient>);

    impl CompletionClient for SharedClient {
        fn complete(&self, content: &str) -> Result<Completion> {
            self.0.complete(content)
        }
    }

    #[test]
    fn test_prompt_is_instructions_blank_line_content() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("page").write_str("<div>doc</div>").unwrap();

        let config = Config::builder()
            .root_dir(temp.path())
            .api_key("test-key")
            .instructions("Rewrite as markdown.")
            .build()
            .unwrap();

        let fake = Arc::new(FakeClient::with_results(vec![FakeClient::ok("ok")]));
        let pipeline =
            Pipeline::with_client(config, Box::new(SharedClient(Arc::clone(&fake)))).unwrap();
        pipeline.run().unwrap();

        let prompts = fake.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], "Rewrite as markdown.\n\n<div>doc</div>");
    }

    #[test]
    fn test_unexpected_response_leaves_no_output_and_continues() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("alpha").write_str("a").unwrap();
        temp.child("beta").write_str("b").unwrap();

        // Candidates are processed in sorted order: alpha fails, beta works.
        let client = FakeClient::with_results(vec![
            Err(Error::UnexpectedResponse),
            FakeClient::ok("# Beta"),
        ]);
        let pipeline = Pipeline::with_client(test_config(temp.path()), Box::new(client)).unwrap();
        let stats = pipeline.run().unwrap();

        assert_eq!(stats.converted, 1);
        assert_eq!(stats.failed, 1);
        assert!(!temp.child("alpha.md").exists());
        temp.child("beta.md").assert("# Beta");
    }

    #[test]
    fn test_read_failure_is_isolated() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("binary").write_binary(&[0u8; 16]).unwrap();
        temp.child("clean").write_str("<p>ok</p>").unwrap();

        // The binary candidate fails before any API call, so one canned
        // result is enough for the clean candidate.
        let client = FakeClient::with_results(vec![FakeClient::ok("# Clean")]);
        let pipeline = Pipeline::with_client(test_config(temp.path()), Box::new(client)).unwrap();
        let stats = pipeline.run().unwrap();

        assert_eq!(stats.candidates, 2);
        assert_eq!(stats.converted, 1);
        assert_eq!(stats.failed, 1);
        assert!(!temp.child("binary.md").exists());
        temp.child("clean.md").assert("# Clean");
    }

    #[test]
    fn test_already_converted_files_are_not_reprocessed() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("done").write_str("x").unwrap();
        temp.child("done.md").write_str("existing").unwrap();

        let client = FakeClient::with_results(vec![]);
        let pipeline = Pipeline::with_client(test_config(temp.path()), Box::new(client)).unwrap();
        let stats = pipeline.run().unwrap();

        assert_eq!(stats.candidates, 0);
        temp.child("done.md").assert("existing");
    }

    #[test]
    fn test_dry_run_calls_nothing_and_writes_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("report").write_str("<html></html>").unwrap();

        let config = Config::builder()
            .root_dir(temp.path())
            .api_key("test-key")
            .dry_run(true)
            .build()
            .unwrap();

        let fake = Arc::new(FakeClient::with_results(vec![]));
        let pipeline =
            Pipeline::with_client(config, Box::new(SharedClient(Arc::clone(&fake)))).unwrap();
        let stats = pipeline.run().unwrap();

        assert_eq!(stats.candidates, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.converted, 0);
        assert_eq!(stats.failed, 0);
        assert!(fake.prompts.lock().unwrap().is_empty());
        assert!(!temp.child("report.md").exists());
    }

    #[test]
    fn test_empty_directory_is_a_successful_noop() {
        let temp = assert_fs::TempDir::new().unwrap();

        let client = FakeClient::with_results(vec![]);
        let pipeline = Pipeline::with_client(test_config(temp.path()), Box::new(client)).unwrap();
        let stats = pipeline.run().unwrap();

        assert_eq!(stats.candidates, 0);
        assert_eq!(stats.converted, 0);
    }
}
