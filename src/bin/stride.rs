//! Stride CLI - Command-line interface for stride metrics
//!
//! Commands:
//! - steps: Report on a steps-only record
//! - training: Report on a training record
//! - batch: Process one record per line into NDJSON summaries

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use stride_metrics::config::{ConfigError, ProfileConfig};
use stride_metrics::{
    report_steps, report_training, steps_summary, training_summary, ComputeError, StepsSummary,
    TrainingSummary, STRIDE_VERSION,
};

/// Stride - Fitness metrics from activity records
#[derive(Parser)]
#[command(name = "stride")]
#[command(author = "Synheart AI Inc")]
#[command(version = STRIDE_VERSION)]
#[command(about = "Compute distance, speed and calories from activity records", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ProfileArgs {
    /// Body weight in kg
    #[arg(long)]
    weight: Option<f64>,

    /// Height
    #[arg(long)]
    height: Option<f64>,

    /// Profile JSON file with weight_kg and height
    #[arg(long)]
    profile: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report on a steps-only record, e.g. "5000,1h30m"
    Steps {
        /// Record text
        record: String,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Output the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report on a training record, e.g. "5000,Running,1h30m"
    Training {
        /// Record text
        record: String,

        #[command(flatten)]
        profile: ProfileArgs,

        /// Output the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Process one record per line (NDJSON output)
    Batch {
        /// Input file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Record kind on each line
        #[arg(long, default_value = "training")]
        mode: RecordMode,

        #[command(flatten)]
        profile: ProfileArgs,
    },
}

#[derive(Clone, ValueEnum)]
enum RecordMode {
    /// "<steps>,<duration>"
    Steps,
    /// "<steps>,<label>,<duration>"
    Training,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(err) = CliError::from_error(e) {
                eprintln!(
                    "{}",
                    serde_json::to_string(&err).unwrap_or_else(|_| "Unknown error".to_string())
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<(), StrideCliError> {
    match cli.command {
        Commands::Steps {
            record,
            profile,
            json,
        } => cmd_steps(&record, &resolve_profile(&profile)?, json),

        Commands::Training {
            record,
            profile,
            json,
        } => cmd_training(&record, &resolve_profile(&profile)?, json),

        Commands::Batch {
            input,
            mode,
            profile,
        } => cmd_batch(&input, mode, &resolve_profile(&profile)?),
    }
}

/// Weight and height from flags and profile file, unvalidated
fn resolve_profile(args: &ProfileArgs) -> Result<Profile, StrideCliError> {
    let (weight, height) = ProfileConfig::load(args.profile.as_deref())?
        .with_overrides(args.weight, args.height)
        .values()?;
    Ok(Profile { weight, height })
}

struct Profile {
    weight: f64,
    height: f64,
}

fn cmd_steps(record: &str, profile: &Profile, json: bool) -> Result<(), StrideCliError> {
    if json {
        return match steps_summary(record, profile.weight, profile.height) {
            Ok(summary) => {
                println!("{}", serde_json::to_string(&summary)?);
                Ok(())
            }
            Err(e) => {
                log::error!("{}", e);
                Err(StrideCliError::EmptyReport)
            }
        };
    }

    // Empty report means failure; the cause has already been logged
    let report = report_steps(record, profile.weight, profile.height);
    if report.is_empty() {
        return Err(StrideCliError::EmptyReport);
    }
    print!("{}", report);
    Ok(())
}

fn cmd_training(record: &str, profile: &Profile, json: bool) -> Result<(), StrideCliError> {
    if json {
        let summary = training_summary(record, profile.weight, profile.height).map_err(|e| {
            log::error!("{}", e);
            e
        })?;
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        print!("{}", report_training(record, profile.weight, profile.height)?);
    }
    Ok(())
}

fn cmd_batch(
    input: &Path,
    mode: RecordMode,
    profile: &Profile,
) -> Result<(), StrideCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            log::warn!("reading records from the terminal; finish with Ctrl-D");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut processed = 0;
    let mut failed = 0;

    for (line_num, line) in input_data.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        processed += 1;

        let result = match mode {
            RecordMode::Steps => {
                steps_summary(line, profile.weight, profile.height).map(SummaryLine::Steps)
            }
            RecordMode::Training => {
                training_summary(line, profile.weight, profile.height).map(SummaryLine::Training)
            }
        };

        match result {
            Ok(summary) => writeln!(out, "{}", serde_json::to_string(&summary)?)?,
            Err(e) => {
                failed += 1;
                log::error!("line {}: {}", line_num + 1, e);
                let detail = LineError {
                    line: line_num + 1,
                    code: e.kind().to_string(),
                    error: e.to_string(),
                };
                eprintln!("{}", serde_json::to_string(&detail)?);
            }
        }
    }
    out.flush()?;

    log::info!("processed {} records, {} failed", processed, failed);

    if failed > 0 {
        Err(StrideCliError::BatchFailed(failed))
    } else {
        Ok(())
    }
}

#[derive(serde::Serialize)]
#[serde(untagged)]
enum SummaryLine {
    Steps(StepsSummary),
    Training(TrainingSummary),
}

// Error types

#[derive(Debug)]
enum StrideCliError {
    Io(io::Error),
    Compute(ComputeError),
    Config(ConfigError),
    Json(serde_json::Error),
    EmptyReport,
    BatchFailed(usize),
}

impl From<io::Error> for StrideCliError {
    fn from(e: io::Error) -> Self {
        StrideCliError::Io(e)
    }
}

impl From<ComputeError> for StrideCliError {
    fn from(e: ComputeError) -> Self {
        StrideCliError::Compute(e)
    }
}

impl From<ConfigError> for StrideCliError {
    fn from(e: ConfigError) -> Self {
        StrideCliError::Config(e)
    }
}

impl From<serde_json::Error> for StrideCliError {
    fn from(e: serde_json::Error) -> Self {
        StrideCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl CliError {
    /// JSON error for stderr; `None` when the failure must stay silent
    fn from_error(e: StrideCliError) -> Option<Self> {
        let err = match e {
            StrideCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            StrideCliError::Compute(e) => CliError {
                code: e.kind().to_string(),
                message: e.to_string(),
                hint: Some(compute_hint(&e).to_string()),
            },
            StrideCliError::Config(e) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Pass --weight and --height, or a --profile file".to_string()),
            },
            StrideCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            StrideCliError::EmptyReport => return None,
            StrideCliError::BatchFailed(count) => CliError {
                code: "BATCH_FAILED".to_string(),
                message: format!("{} records failed", count),
                hint: Some("See per-line errors above".to_string()),
            },
        };
        Some(err)
    }
}

fn compute_hint(e: &ComputeError) -> &'static str {
    if e.is_parse_error() {
        return "Expected \"<steps>,<duration>\" or \"<steps>,<label>,<duration>\"";
    }
    match e {
        ComputeError::Steps(_) => "Step count must be a positive integer",
        ComputeError::Time(_) => "Duration must be positive, e.g. 1h30m or 45m",
        ComputeError::Weight(_) | ComputeError::Height(_) => "Weight and height must be positive",
        ComputeError::UnknownTrainingType(_) => "Training type must be Running or Walking",
        _ => "Check the record",
    }
}

#[derive(serde::Serialize)]
struct LineError {
    line: usize,
    code: String,
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(weight: Option<f64>, height: Option<f64>) -> ProfileArgs {
        ProfileArgs {
            weight,
            height,
            profile: None,
        }
    }

    #[test]
    fn test_resolve_profile_passes_out_of_range_values() {
        let profile = resolve_profile(&args(Some(0.0), Some(1.75))).unwrap();
        assert_eq!(profile.weight, 0.0);

        // silent failure: no JSON error object for the steps path
        let err = cmd_steps("5000,1h", &profile, false).unwrap_err();
        assert!(matches!(err, StrideCliError::EmptyReport));
        assert!(CliError::from_error(err).is_none());
    }

    #[test]
    fn test_resolve_profile_missing_value() {
        let err = resolve_profile(&args(Some(75.0), None)).unwrap_err();
        assert!(matches!(err, StrideCliError::Config(ConfigError::MissingField("height"))));
    }

    #[test]
    fn test_training_record_errors_come_first() {
        let profile = resolve_profile(&args(Some(-1.0), Some(1.75))).unwrap();
        for json in [false, true] {
            let err = cmd_training("junk", &profile, json).unwrap_err();
            let cli_err = CliError::from_error(err).unwrap();
            assert_eq!(cli_err.code, "STRING_FORMAT");
        }
        let err = cmd_training("5000,Running,1h", &profile, true).unwrap_err();
        assert!(matches!(err, StrideCliError::Compute(ComputeError::Weight(_))));
    }

    #[test]
    fn test_parse_errors_share_format_hint() {
        let format_hint = compute_hint(&ComputeError::StringFormat {
            expected: 2,
            found: 1,
        });
        assert!(format_hint.starts_with("Expected"));
        assert_eq!(compute_hint(&ComputeError::InvalidDuration("1y".to_string())), format_hint);
        assert_eq!(compute_hint(&ComputeError::Steps(0)), "Step count must be a positive integer");
    }
}
