use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glob::glob;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use wzreplay_core::source::replay::layout::REPLAY_EXTENSION;
use wzreplay_core::{
    AnalysisError, AnalysisOptions, ParseOptions, ReplayError, ReplayErrorKind, Report,
    ReportOptions, analyze_replay_file,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("WZREPLAY_BUILD_COMMIT"),
    ", ",
    env!("WZREPLAY_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  wzreplay replay analyse game.wzrp -o report.json\n  wzreplay replay analyze game.wzrp --stdout --pretty\n  wzreplay replay analyse game.wzrp --stats data/mp/stats -o report.json --list-violations\n  wzreplay replay analyse game.wzrp --stats data/mp/stats --orders --stdout";

#[derive(Parser, Debug)]
#[command(name = "wzreplay")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Offline decoder and analyser for Warzone 2100 replays (.wzrp).",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on .wzrp replay files.
    Replay {
        #[command(subcommand)]
        command: ReplayCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ReplayCommands {
    /// Decode a replay and generate a versioned JSON report.
    #[command(alias = "analyze")]
    #[command(after_help = EXAMPLES)]
    Analyse(AnalyseArgs),
}

#[derive(Args, Debug)]
struct AnalyseArgs {
    /// Path to a .wzrp file (a glob matching exactly one file is accepted)
    input: PathBuf,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log every framed message to stderr
    #[arg(long)]
    verbose: bool,

    /// Exit with a non-zero code if droid violations or diagnostics are present
    #[arg(long)]
    strict: bool,

    /// Treat header and embedded map version mismatches as fatal
    #[arg(long)]
    strict_versions: bool,

    /// Stats directory (body.json, research.json, ...) for names and droid checks
    #[arg(long, value_name = "DIR")]
    stats: Option<PathBuf>,

    /// Write the embedded map blob to this path
    #[arg(long, value_name = "PATH")]
    map_out: Option<PathBuf>,

    /// List droid violations and diagnostics after analysis
    #[arg(long)]
    list_violations: bool,

    /// Include droid, structure and gift orders in the report
    #[arg(long)]
    orders: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Replay { command } => match command {
            ReplayCommands::Analyse(args) => {
                init_tracing(args.quiet, args.verbose);
                cmd_replay_analyse(args)
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) {
    let default = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

impl From<ReplayError> for CliError {
    fn from(err: ReplayError) -> Self {
        let hint = match &err.kind {
            ReplayErrorKind::BadMagic { .. } => {
                Some("input is not a Warzone 2100 replay".to_string())
            }
            ReplayErrorKind::UnsupportedVersion { .. }
            | ReplayErrorKind::BadEmbeddedMapVersion { .. } => {
                Some("retry without --strict-versions to decode anyway".to_string())
            }
            kind if kind.is_truncation() => Some(format!(
                "the replay looks truncated; {} messages decoded before the failure",
                err.partial.len()
            )),
            _ => None,
        };
        CliError::new(err.to_string(), hint)
    }
}

impl From<AnalysisError> for CliError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Replay(err) => err.into(),
            AnalysisError::Stats(err) => CliError::new(
                err.to_string(),
                Some("--stats must point at a directory such as data/mp/stats".to_string()),
            ),
            AnalysisError::Io(err) => CliError::new(
                format!("failed to read input file: {err}"),
                None,
            ),
        }
    }
}

fn cmd_replay_analyse(args: AnalyseArgs) -> Result<(), CliError> {
    if args.pretty && args.compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }

    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report_path = if args.stdout {
        None
    } else {
        Some(args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    for output in report_path.iter().chain(args.map_out.iter()) {
        ensure_distinct_from_input(output, &input_abs)?;
    }

    let options = AnalysisOptions {
        parse: ParseOptions {
            strict_versions: args.strict_versions,
        },
        stats_dir: args.stats.clone(),
        report: ReportOptions {
            include_orders: args.orders,
        },
    };
    let analysis = analyze_replay_file(&resolved_input, &options)?;
    debug!(messages = analysis.replay.messages.len(), "replay decoded");
    let rep = &analysis.report;

    if let Some(map_out) = args.map_out.as_ref() {
        match analysis.embedded_map() {
            Some(map) => {
                create_parent_dir(map_out)?;
                fs::write(map_out, map).with_context(|| {
                    format!("Failed to write embedded map: {}", map_out.display())
                })?;
                if !args.quiet {
                    eprintln!("OK: embedded map written -> {}", map_out.display());
                }
            }
            None => warn!("replay has no embedded map; {} not written", map_out.display()),
        }
    }

    let json = serialize_report(rep, args.pretty)?;

    if let Some(report) = report_path.as_ref() {
        create_parent_dir(report)?;
        fs::write(report, json)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
    } else {
        print!("{}", json);
    }

    if args.list_violations && !args.quiet {
        print_violations(rep);
    }
    if let Some(report) = report_path.as_ref() {
        if !args.quiet {
            eprintln!("OK: report written -> {}", report.display());
        }
    }
    if args.strict && has_findings(rep) {
        return Err(CliError::new(
            "droid violations or diagnostics detected",
            Some("use --list-violations to inspect".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct_from_input(output: &Path, input_abs: &Path) -> Result<(), CliError> {
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A parent that does not exist yet cannot contain the input.
    let Ok(parent_abs) = fs::canonicalize(parent) else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path: {}", output.display()))?;
    if parent_abs.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}

fn serialize_report(rep: &Report, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn has_findings(rep: &Report) -> bool {
    !rep.droid_violations.is_empty() || !rep.diagnostics.is_empty()
}

fn print_violations(rep: &Report) {
    eprintln!("Droid violations:");
    for violation in &rep.droid_violations {
        eprintln!(
            "  {} player {} @ {}ms: {} ({})",
            violation.id,
            violation.player,
            violation.game_time,
            violation.message,
            violation.droid.name
        );
    }
    eprintln!("Diagnostics:");
    for line in &rep.diagnostics {
        eprintln!("  {}", line);
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .wzrp replay file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .wzrp replay file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != REPLAY_EXTENSION {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .wzrp file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .wzrp".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single replay file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
