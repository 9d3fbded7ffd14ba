//! gosynth CLI
//!
//! # Usage
//!
//! ```bash
//! # Write delegating proxies under <module>/build
//! gosynth decorate path/to/module
//!
//! # Write builders and mocks under <module>/gen, print the summary as JSON
//! gosynth generate path/to/module --json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use gosynth::config::{FormatterKind, SynthConfig};
use gosynth::usecases::{Operation, SynthesisRequest, SynthesisResult, SynthesisService};
use gosynth::SynthError;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gosynth")]
#[command(about = "Go source synthesis - layer proxies, builders and mocks", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize layer proxies and rewire entry packages
    Decorate(RunArgs),

    /// Synthesize builders and mocks
    Generate(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Module root
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Configuration file (defaults to <path>/gosynth.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Formatter for synthesized files: goimports, gofmt or none
    #[arg(long)]
    formatter: Option<FormatterKind>,

    /// Rewire the entry package's _test.go files too
    #[arg(long)]
    include_tests: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (operation, args) = match cli.command {
        Commands::Decorate(args) => (Operation::Decorate, args),
        Commands::Generate(args) => (Operation::Generate, args),
    };

    match run(operation, &args) {
        Ok(result) => {
            if args.json {
                match serde_json::to_string_pretty(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!(error = %e, "Could not serialize summary");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                for path in &result.summary.files_written {
                    println!("{}", path.display());
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            let unsupported = e
                .downcast_ref::<SynthError>()
                .map(SynthError::is_programming_error)
                .unwrap_or(false);
            if unsupported {
                error!(error = %e, "{} halted on a declaration it cannot synthesize", operation);
            } else {
                error!(error = %e, "{} failed", operation);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(operation: Operation, args: &RunArgs) -> Result<SynthesisResult, Box<dyn std::error::Error>> {
    let mut config = load_config(&args.path, args.config.as_deref())?;
    if let Some(formatter) = args.formatter {
        config = config.with_formatter(formatter);
    }
    if args.include_tests {
        config = config.with_skip_test_files(false);
    }

    let service = SynthesisService::new(config);
    Ok(service.run(&SynthesisRequest::new(operation, &args.path))?)
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<SynthConfig, Box<dyn std::error::Error>> {
    Ok(match explicit {
        Some(path) => SynthConfig::from_yaml_file(path)?,
        None => SynthConfig::load(root)?,
    })
}
