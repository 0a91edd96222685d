use anyhow::{Context, Result};
use approval_core::{classify, comments_from_json, evaluate, AggregateDecision, ApprovalReport};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Approval: decide whether a pull request or issue is approved from its comments
#[derive(Parser, Debug)]
#[command(name = "approval", version)]
#[command(about = "Comment-driven approval gate", long_about = None)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the aggregate decision for a comment history
    Evaluate(EvaluateArgs),
    /// Classify a single comment body
    Classify(ClassifyArgs),
    /// Print version and build commit
    Version,
}

#[derive(Parser, Debug)]
struct EvaluateArgs {
    /// JSON array of comments, oldest first ("-" reads stdin)
    #[arg(long, default_value = "-")]
    comments: String,

    /// Authorized approver login (repeatable; falls back to APPROVAL_APPROVERS)
    #[arg(long = "approver")]
    approvers: Vec<String>,

    /// Current item state, "open" or "closed" (falls back to APPROVAL_ITEM_STATE, then open)
    #[arg(long)]
    state: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Parser, Debug)]
struct ClassifyArgs {
    /// Comment body to classify
    body: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Process exit status for a decision. Errors exit with 1.
fn exit_status(decision: AggregateDecision) -> u8 {
    match decision {
        AggregateDecision::Approved => 0,
        AggregateDecision::Pending => 2,
        AggregateDecision::Denied => 3,
    }
}

fn get_version() -> String {
    let hash = option_env!("APPROVAL_GIT_HASH").or(built_info::GIT_COMMIT_HASH);
    match hash {
        Some(hash) => format!(
            "{} ({})",
            built_info::PKG_VERSION,
            &hash[..hash.len().min(8)]
        ),
        None => format!("{} (unknown)", built_info::PKG_VERSION),
    }
}

fn read_comments_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read comments from stdin")?;
        Ok(input)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read comments from {}", path))
    }
}

fn render_report(report: &ApprovalReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.decision.to_string()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize approval report")
        }
    }
}

fn run_evaluate(args: EvaluateArgs) -> Result<ExitCode> {
    let config = Config::resolve(args.approvers, args.state)?;

    let input = read_comments_input(&args.comments)?;
    let comments = comments_from_json(&input).context("Failed to parse comments")?;
    debug!(
        "Evaluating {} comments against {} approvers",
        comments.len(),
        config.approvers.len()
    );

    let report = evaluate(&comments, &config.approvers, config.item_state)
        .context("Failed to classify comments; decision undetermined")?;
    info!(
        "Item is {} ({} approvers, {} item)",
        report.decision,
        config.approvers.len(),
        config.item_state
    );

    println!("{}", render_report(&report, args.format)?);
    Ok(ExitCode::from(exit_status(report.decision)))
}

fn run_classify(args: ClassifyArgs) -> Result<ExitCode> {
    let signal = classify(&args.body).context("Failed to classify comment body")?;
    println!("{}", signal);
    Ok(ExitCode::SUCCESS)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Evaluate(args) => run_evaluate(args),
        Commands::Classify(args) => run_classify(args),
        Commands::Version => {
            println!("approval {}", get_version());
            Ok(ExitCode::SUCCESS)
        }
    }
}
