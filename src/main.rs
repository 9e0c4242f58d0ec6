use anyhow::Context;
use clap::Parser;
use llm_md::{Config, Pipeline};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "llm-md",
    version,
    about = "Convert extensionless HTML documents into markdown via a completion API",
    long_about = "Convert extensionless HTML documents into LLM-friendly markdown.\n\n\
    This tool scans a directory for files with no extension that have no .md \
    sibling yet, sends each file's content to a chat-completion endpoint with \
    a fixed conversion prompt, and writes the response next to the original \
    as <name>.md. Files are processed one at a time; a failure on one file is \
    logged and the run continues.\n\n\
    USAGE EXAMPLES:\n  \
      # Convert everything pending in ./docs\n  \
      llm-md --path ./docs\n\n  \
      # See what would be converted\n  \
      llm-md --path ./docs --dry-run\n\n  \
      # Use a different model\n  \
      llm-md --path ./docs --model gpt-4.1-mini"
)]
struct Cli {
    /// Directory to search for unconverted files
    #[arg(short, long, value_name = "PATH")]
    path: PathBuf,

    /// Completion model identifier
    #[arg(short, long, default_value = "gpt-4.1")]
    model: String,

    /// Base URL of the chat-completion API
    #[arg(long, default_value = "https://api.openai.com/v1", value_name = "URL")]
    api_base: String,

    /// API key for the completion endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, value_name = "KEY")]
    api_key: String,

    /// Request timeout in seconds (0 disables the timeout)
    #[arg(long, default_value_t = 300)]
    timeout_secs: u64,

    /// List candidates without calling the API or writing files
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    let config = Config::builder()
        .root_dir(cli.path)
        .model(cli.model)
        .api_base(cli.api_base)
        .api_key(cli.api_key)
        .timeout_secs(cli.timeout_secs)
        .dry_run(cli.dry_run)
        .build()
        .context("Failed to build configuration")?;

    let stats = Pipeline::new(config)
        .context("Failed to create pipeline")?
        .run()
        .context("Conversion run failed")?;

    stats.print_summary();

    Ok(())
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("llm_md=info"),
        1 => EnvFilter::new("llm_md=debug"),
        _ => EnvFilter::new("llm_md=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();

    Ok(())
}
