use anyhow::{Context, Result};
use chunkscribe::app::run_transcribe_command;
use chunkscribe::cli::Cli;
use chunkscribe::config::Config;
use clap::Parser;
use owo_colors::OwoColorize;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let input = cli.input.clone();
    let verbose = cli.verbose;

    if verbose >= 2 {
        eprintln!("chunkscribe {}", chunkscribe::version_string().dimmed());
    }

    // The pipeline blocks on worker threads; keep it off the async runtime.
    let outcome = tokio::task::spawn_blocking(move || run_transcribe_command(config, cli))
        .await
        .context("transcription task panicked")?
        .with_context(|| format!("Failed to transcribe {}", input.display()))?;

    if verbose >= 2 && !outcome.failures.is_empty() {
        eprintln!(
            "{}",
            format!(
                "{} of {} chunks failed",
                outcome.failures.len(),
                outcome.total_chunks
            )
            .yellow()
        );
    }

    Ok(())
}

fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        // Load from custom path
        Config::load(path).with_context(|| format!("Failed to load config from {}", path.display()))?
    } else {
        // Try default path, fall back to defaults
        let default_path = Config::default_path();
        Config::load_or_default(&default_path)?
    };

    // Apply environment variable overrides
    Ok(config.with_env_overrides()?)
}
