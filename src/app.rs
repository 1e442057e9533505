//! Transcription application entry point.
//!
//! Composes the complete file-to-text flow:
//! config + CLI → backend → pipeline → transcript file

use crate::cli::Cli;
use crate::config::Config;
use crate::defaults;
use crate::error::Result;
use crate::output::StderrReporter;
use crate::pipeline::assembler::FailurePolicy;
use crate::pipeline::orchestrator::{Pipeline, TranscriptionOutcome, default_output_path};
use crate::stt::transcriber::Transcriber;
use crate::stt::whisper::{WhisperConfig, WhisperTranscriber};
use std::path::PathBuf;

/// Apply command-line values on top of file and environment configuration.
pub fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(model) = &cli.model {
        config.stt.model = model.clone();
    }
    if let Some(language) = &cli.language {
        config.stt.language = language.clone();
    }
    if let Some(threads) = cli.threads {
        config.stt.threads = Some(threads as usize);
    }
    if let Some(mode) = cli.mode {
        config.scheduling.mode = mode;
    }
    if let Some(workers) = cli.workers {
        config.scheduling.workers = Some(workers as usize);
    }
    if cli.placeholder_failures {
        config.output.failure_policy = FailurePolicy::Placeholder;
    }
    config
}

/// Run the transcribe command: load model → transcribe `cli.input` → write transcript.
///
/// Blocking; the binary calls it from `spawn_blocking`.
pub fn run_transcribe_command(config: Config, cli: Cli) -> Result<TranscriptionOutcome> {
    let config = apply_cli_overrides(config, &cli);
    config.validate()?;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    if !cli.quiet {
        eprintln!("Loading model '{}'...", config.stt.model);
    }
    let transcriber = create_transcriber(&config)?;
    if cli.verbose >= 2 {
        let whisper = transcriber.config();
        eprintln!(
            "  [model {} on {} language={} threads={}]",
            transcriber.model_name(),
            defaults::gpu_backend(),
            whisper.language,
            whisper
                .threads
                .map(|t| t.to_string())
                .unwrap_or_else(|| "auto".to_string())
        );
    }

    let reporter = StderrReporter::new(cli.quiet, cli.verbose);
    let pipeline = Pipeline::new(&transcriber, &reporter, config.pipeline_config());
    pipeline.run(&cli.input, &output)
}

/// Create the Whisper backend from configuration.
fn create_transcriber(config: &Config) -> Result<WhisperTranscriber> {
    WhisperTranscriber::new(WhisperConfig {
        model_path: build_model_path(&config.stt.model),
        language: config.stt.language.clone(),
        threads: config.stt.threads,
    })
}

/// Build the full path to a Whisper model file.
///
/// Paths are used as given; bare names such as `base` or `ggml-base.bin`
/// are looked up in the local `models/` directory.
fn build_model_path(model: &str) -> PathBuf {
    let path = PathBuf::from(model);

    if path.is_absolute() || path.exists() || model.contains('/') || model.contains('\\') {
        return path;
    }

    let model_filename = if model.ends_with(".bin") {
        model.to_string()
    } else {
        format!("ggml-{}.bin", model)
    };

    PathBuf::from("models").join(model_filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChunkscribeError;
    use crate::pipeline::types::SchedulingMode;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["chunkscribe", "input.wav"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_no_flags_keep_config() {
        let config = Config::default();
        assert_eq!(apply_cli_overrides(config.clone(), &cli(&[])), config);
    }

    #[test]
    fn test_cli_values_override_config() {
        let mut config = Config::default();
        config.scheduling.workers = Some(8);
        config.stt.language = "en".to_string();

        let config = apply_cli_overrides(
            config,
            &cli(&[
                "--mode",
                "sequential",
                "--workers",
                "2",
                "--language",
                "de",
                "--model",
                "/opt/ggml-tiny.bin",
                "--threads",
                "3",
                "--placeholder-failures",
            ]),
        );

        assert_eq!(config.scheduling.mode, SchedulingMode::Sequential);
        assert_eq!(config.scheduling.workers, Some(2));
        assert_eq!(config.stt.language, "de");
        assert_eq!(config.stt.model, "/opt/ggml-tiny.bin");
        assert_eq!(config.stt.threads, Some(3));
        assert_eq!(config.output.failure_policy, FailurePolicy::Placeholder);
    }

    #[test]
    fn test_build_model_path_bare_name() {
        assert_eq!(
            build_model_path("small"),
            PathBuf::from("models").join("ggml-small.bin")
        );
        assert_eq!(
            build_model_path("ggml-tiny.bin"),
            PathBuf::from("models").join("ggml-tiny.bin")
        );
    }

    #[test]
    fn test_build_model_path_keeps_paths() {
        assert_eq!(
            build_model_path("/opt/models/ggml-base.bin"),
            PathBuf::from("/opt/models/ggml-base.bin")
        );
        assert_eq!(
            build_model_path("weights/custom.bin"),
            PathBuf::from("weights/custom.bin")
        );
    }

    #[test]
    fn test_missing_model_fails_before_transcription() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("ggml-missing.bin");
        let cli = cli(&["--model", missing.to_str().unwrap(), "-q"]);

        match run_transcribe_command(Config::default(), cli) {
            Err(ChunkscribeError::TranscriptionModelNotFound { path }) => {
                assert!(path.contains("ggml-missing.bin"), "path: {}", path)
            }
            other => panic!("Expected TranscriptionModelNotFound, got {:?}", other),
        }
    }
}
