//! CLI command definitions for guidelint.

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use crate::checks;
use crate::config::{CheckConfig, DEFAULT_PYTHON_BIN, DEFAULT_REPORT_FILE, DEFAULT_TIMEOUT_SECS};
use crate::report::{Issue, IssueReport};
use crate::runner::Executor;
use crate::scanner::DOC_FILENAME;
use crate::session::Session;

/// Validation harness for paired secure-coding example snippets and
/// their documentation.
#[derive(Parser)]
#[command(name = "guidelint")]
#[command(about = "Validate secure-coding example snippets and their documentation")]
#[command(version)]
#[command(
    long_about = "guidelint validates a secure-coding guide tree: snippet syntax and runtime \
behavior, README template structure, cross-references between articles and snippets, and \
documented expected outputs.\n\nExample usage:\n  guidelint check --root ./docs/guide --save"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run the full validation suite and print the issue report.
    Check(CheckArgs),

    /// List the discovered snippets, articles and category directories.
    Scan(ScanArgs),
}

/// Arguments for `guidelint check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Root of the guide tree to validate.
    #[arg(short, long, default_value = ".")]
    pub root: String,

    /// Interpreter used to execute snippets.
    #[arg(long, default_value = DEFAULT_PYTHON_BIN, env = "GUIDELINT_PYTHON")]
    pub python: String,

    /// Wall-clock timeout per executed snippet, in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Skip snippet execution (static and documentation checks only).
    #[arg(long)]
    pub no_exec: bool,

    /// Save the report to the report file in addition to printing it.
    #[arg(long)]
    pub save: bool,

    /// File the report is saved to with --save.
    #[arg(long, default_value = DEFAULT_REPORT_FILE)]
    pub report_file: String,

    /// Print the issues as JSON instead of the textual report.
    #[arg(short, long)]
    pub json: bool,
}

/// Arguments for `guidelint scan`.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Root of the guide tree to scan.
    #[arg(short, long, default_value = ".")]
    pub root: String,
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to access CLI arguments (like log_level) before
/// running commands.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Run the CLI with the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Check(args) => run_check_command(args).await,
        Commands::Scan(args) => run_scan_command(args).await,
    }
}

async fn run_check_command(args: CheckArgs) -> anyhow::Result<()> {
    let root = Path::new(&args.root);
    if !root.exists() {
        anyhow::bail!("Root directory does not exist: {}", args.root);
    }

    let mut config = CheckConfig::new(root)
        .with_python_bin(args.python)
        .with_timeout(Duration::from_secs(args.timeout))
        .with_report_path(&args.report_file);
    if args.no_exec {
        config = config.without_execution();
    }

    let report = run_validation(config.clone()).await;

    if args.json {
        println!("{}", report.to_json()?);
    } else if report.is_empty() {
        println!("All checks passed!");
    } else {
        println!("{}", report.render());
    }

    if args.save {
        report.save(&config.report_path)?;
        info!("Report saved to {}", config.report_path.display());
    }

    if report.is_empty() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}

/// Runs the documentation and code passes and aggregates their issues.
///
/// The passes are independent so a broken category in one never hides
/// findings in the other, and every per-file check is isolated.
pub async fn run_validation(config: CheckConfig) -> IssueReport {
    let session = Session::begin(config.clone());
    let mut issues: Vec<Issue> = Vec::new();

    // Documentation pass.
    info!("Checking documentation ({} articles)", session.doc_files.len());
    for doc in &session.doc_files {
        issues.extend(checks::docs::check_doc(doc));
        issues.extend(checks::links::check_doc_links(doc));
    }
    issues.extend(checks::links::check_index(&config.root));

    // Code pass. All code checks need the interpreter, so --no-exec
    // skips the pass entirely.
    if config.execute {
        info!("Checking code examples ({} snippets)", session.code_files.len());
        let executor = Executor::new(&config);
        for file in &session.code_files {
            issues.extend(checks::code::check_code(&executor, file).await);
        }
    }

    // Cleanup runs regardless of how many validations failed.
    session.finalize();

    IssueReport::from_issues(issues, &config.root)
}

async fn run_scan_command(args: ScanArgs) -> anyhow::Result<()> {
    let root = Path::new(&args.root);
    if !root.exists() {
        anyhow::bail!("Root directory does not exist: {}", args.root);
    }

    let session = Session::begin(CheckConfig::new(root).without_execution());

    println!("Code files ({}):", session.code_files.len());
    for file in &session.code_files {
        println!("  {}", file.display());
    }
    println!("\nDoc files ({}):", session.doc_files.len());
    for file in &session.doc_files {
        println!("  {}", file.display());
    }
    println!("\nCategory directories ({}):", session.category_dirs.len());
    for dir in &session.category_dirs {
        println!("  {}", dir.display());
        if !dir.join(DOC_FILENAME).exists() {
            warn!("Category {} has no {}", dir.display(), DOC_FILENAME);
        }
    }

    session.finalize();
    Ok(())
}
