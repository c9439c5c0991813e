//! CLI commands and logging setup

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use passenger_pipeline::{
    AgeImputation, FittedPipeline, PassengerRecord, Pipeline, PipelineConfig, TrainingSet,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Fit and replay the passenger survival feature pipeline
#[derive(Debug, Parser)]
#[command(name = "titanic-features", version, about, long_about = None)]
pub(crate) struct Cli {
    /// TOML configuration file; TITANIC_* environment variables override it
    #[arg(short, long, global = true, env = "TITANIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Age imputation choice on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum AgeStrategy {
    /// Median age of the passenger's title group
    Title,
    /// Median age of the passenger's class and sex
    ClassSex,
}

impl From<AgeStrategy> for AgeImputation {
    fn from(strategy: AgeStrategy) -> Self {
        match strategy {
            AgeStrategy::Title => AgeImputation::TitleGroup,
            AgeStrategy::ClassSex => AgeImputation::ClassSex,
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Fit lookups and encoder schema from a training CSV and write artifacts
    Fit {
        /// Headered passenger manifest
        #[arg(long)]
        train: PathBuf,

        /// Artifact output path (defaults to the configured artifact_path)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Override the configured age imputation strategy
        #[arg(long, value_enum)]
        age_strategy: Option<AgeStrategy>,
    },

    /// Transform a JSON array of records into a feature matrix
    Transform {
        /// Fitted artifacts (defaults to the configured artifact_path)
        #[arg(short, long)]
        artifacts: Option<PathBuf>,

        /// JSON input file; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print a summary of fitted artifacts
    Inspect {
        /// Fitted artifacts (defaults to the configured artifact_path)
        #[arg(short, long)]
        artifacts: Option<PathBuf>,
    },
}

/// Install the global tracing subscriber; logs go to stderr so stdout stays JSON
pub(crate) fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let level: Level = level
        .parse()
        .with_context(|| format!("invalid log level '{}'", level))?;

    match format {
        LogFormat::Text => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_target(true)
                .with_writer(io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Json => {
            let subscriber = FmtSubscriber::builder()
                .json()
                .with_max_level(level)
                .with_writer(io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

/// Dispatch a parsed command line
pub(crate) fn run(cli: Cli) -> Result<()> {
    let mut config = PipelineConfig::load(cli.config.as_deref()).context("loading configuration")?;
    init_logging(&config.log_level, cli.log_format)?;
    info!("=== Titanic Features v{} ===", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Fit {
            train,
            out,
            age_strategy,
        } => {
            if let Some(strategy) = age_strategy {
                config.age_imputation = strategy.into();
            }
            let out = out.unwrap_or_else(|| config.artifact_path.clone());
            fit(config, &train, &out)
        }
        Command::Transform { artifacts, input } => {
            let path = artifacts.unwrap_or(config.artifact_path);
            transform(&path, input.as_deref())
        }
        Command::Inspect { artifacts } => {
            let path = artifacts.unwrap_or(config.artifact_path);
            inspect(&path)
        }
    }
}

fn fit(config: PipelineConfig, train: &Path, out: &Path) -> Result<()> {
    let training = TrainingSet::from_path(train)
        .with_context(|| format!("reading training set {}", train.display()))?;
    let fitted = Pipeline::new(config).fit(training.records())?;
    fitted
        .artifacts()
        .save_to_file(out)
        .with_context(|| format!("writing artifacts to {}", out.display()))?;

    println!(
        "Fitted {} rows into {} features; artifacts written to {}",
        training.len(),
        fitted.width(),
        out.display()
    );
    Ok(())
}

fn read_records(input: Option<&Path>) -> Result<Vec<PassengerRecord>> {
    let body = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading input {}", path.display()))?,
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            body
        }
    };
    serde_json::from_str(&body).context("parsing passenger records")
}

fn transform(artifacts: &Path, input: Option<&Path>) -> Result<()> {
    let pipeline = FittedPipeline::load(artifacts)
        .with_context(|| format!("loading artifacts from {}", artifacts.display()))?;
    let records = read_records(input)?;
    let matrix = pipeline.transform(&records)?;
    println!("{}", serde_json::to_string(&matrix)?);
    Ok(())
}

#[derive(Debug, Serialize)]
struct ArtifactSummary {
    format_version: u32,
    age_imputation: AgeImputation,
    width: usize,
    columns: Vec<String>,
    embarked_mode: String,
    rare_titles: Vec<String>,
    ticket_groups: usize,
}

impl ArtifactSummary {
    fn new(pipeline: &FittedPipeline) -> Self {
        let artifacts = pipeline.artifacts();
        Self {
            format_version: artifacts.format_version,
            age_imputation: artifacts.age_imputation,
            width: pipeline.width(),
            columns: pipeline.column_names(),
            embarked_mode: artifacts.lookups.embarked_mode().to_string(),
            rare_titles: artifacts.lookups.rare_titles().iter().map(str::to_string).collect(),
            ticket_groups: artifacts.lookups.ticket_counts().len(),
        }
    }
}

fn inspect(artifacts: &Path) -> Result<()> {
    let pipeline = FittedPipeline::load(artifacts)
        .with_context(|| format!("loading artifacts from {}", artifacts.display()))?;
    let summary = ArtifactSummary::new(&pipeline);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
