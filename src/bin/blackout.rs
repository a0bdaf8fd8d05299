//! Command-line entry point for the redaction pipeline.

use blackout::core::{Capabilities, PipelineConfig};
use blackout::pipeline::{Pipeline, RunOptions};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "blackout", about = "Detect and redact PII in document images")]
struct Args {
    /// Path to the input image.
    image: PathBuf,

    /// Directory containing the model artifacts.
    #[arg(long, default_value = "models")]
    model_dir: PathBuf,

    /// Where to write the structured JSON result.
    #[arg(long, default_value = "output.json")]
    out: PathBuf,

    /// Produce a redacted copy of the input image.
    #[arg(long)]
    redact: bool,

    /// Where to write the redacted image.
    #[arg(long, default_value = "redacted.jpg")]
    redacted_out: PathBuf,
}

fn main() -> ExitCode {
    blackout::init_tracing();
    let args = Args::parse();

    let config = PipelineConfig::from_model_dir(&args.model_dir);
    let capabilities = match Capabilities::global(&config.engines) {
        Ok(capabilities) => capabilities,
        Err(err) => {
            error!("failed to initialize engines: {err}");
            return ExitCode::FAILURE;
        }
    };

    let pipeline = Pipeline::new(capabilities, &config);
    let options = RunOptions {
        out_json: args.out,
        redact: args.redact,
        redact_out: args.redacted_out,
    };

    match pipeline.run(&args.image, &options) {
        Ok(result) => {
            println!(
                "{}: {} tokens, {} entities",
                args.image.display(),
                result.tokens.len(),
                result.entities.len()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("pipeline run failed: {err}");
            ExitCode::FAILURE
        }
    }
}
