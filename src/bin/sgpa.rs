//! CLI binary for sgpa-extract.
//!
//! A thin shim over the library crate that maps CLI flags to `ParseConfig`
//! and prints reports.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use sgpa_extract::catalog::{fallback_subjects, CatalogEntry};
use sgpa_extract::{
    debug_extract, list_schemes, parse_result, CatalogProvider, ParseConfig,
    ParseProgressCallback, Program, ProgressCallback, Scheme, SgpaReport, StaticCatalog, Strategy,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner that names the cascade stage currently running.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Reading");
        bar.set_message("Opening PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ParseProgressCallback for CliProgressCallback {
    fn on_parse_start(&self, pages: usize) {
        self.bar.set_message(format!("{pages} pages of text"));
    }

    fn on_scheme_detected(&self, scheme: Scheme) {
        self.bar.println(format!("  {} scheme {}", dim("·"), bold(scheme.as_str())));
    }

    fn on_strategy_attempt(&self, strategy: Strategy) {
        self.bar.set_prefix("Extracting");
        self.bar.set_message(strategy.to_string());
    }

    fn on_strategy_result(&self, strategy: Strategy, records: usize) {
        if records > 0 {
            self.bar.println(format!("  {} {strategy}: {records} rows", green("✓")));
        } else {
            self.bar.println(format!("  {} {strategy}: nothing", dim("✗")));
        }
    }

    fn on_parse_complete(&self, _subjects: usize) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Parse a result sheet
  sgpa parse result.pdf

  # Force a scheme and skip the LLM oracle
  sgpa parse --scheme 2021 --no-oracle result.pdf

  # JSON report
  sgpa parse --json result.pdf > report.json

  # What does the text layer look like?
  sgpa debug result.pdf

  # Subject catalog
  sgpa subjects --year 2022 --program CS
  sgpa subjects --search "machine learning"

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY          Enables the oracle with gemini-2.0-flash
  SGPA_LLM_PROVIDER       Oracle provider (gemini, openai, anthropic, ollama)
  SGPA_MODEL              Oracle model ID
  PDFIUM_LIB_PATH         Directory holding libpdfium
"#;

/// Extract VTU exam results from PDFs and compute the SGPA.
#[derive(Parser, Debug)]
#[command(
    name = "sgpa",
    version,
    about = "Extract VTU exam results from PDFs and compute the SGPA",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "SGPA_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "SGPA_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a result PDF and print the SGPA report.
    Parse(ParseArgs),

    /// List the supported grading schemes.
    Schemes {
        /// Output JSON.
        #[arg(long)]
        json: bool,
    },

    /// Browse the subject catalog.
    Subjects {
        /// Case-insensitive match on code or name.
        #[arg(long, conflicts_with_all = ["year", "program"])]
        search: Option<String>,

        /// Scheme year, e.g. 2022.
        #[arg(long)]
        year: Option<Scheme>,

        /// Program tag, e.g. CS. Requires --year.
        #[arg(long, requires = "year")]
        program: Option<Program>,

        /// Output JSON.
        #[arg(long)]
        json: bool,
    },

    /// Dump the raw text layer of a PDF for troubleshooting.
    Debug {
        /// Local PDF file path or HTTP/HTTPS URL.
        input: String,

        /// PDF user password for encrypted documents.
        #[arg(long, env = "SGPA_PASSWORD")]
        password: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
struct ParseArgs {
    /// Local PDF file path or HTTP/HTTPS URL.
    input: String,

    /// Grading scheme; detected from the course codes if not set.
    #[arg(long, env = "SGPA_SCHEME")]
    scheme: Option<Scheme>,

    /// Output the full report as JSON.
    #[arg(long)]
    json: bool,

    /// Skip the LLM oracle and use local extraction only.
    #[arg(long, env = "SGPA_NO_ORACLE")]
    no_oracle: bool,

    /// Oracle provider: gemini, openai, anthropic, ollama.
    #[arg(long, env = "SGPA_LLM_PROVIDER")]
    provider: Option<String>,

    /// Oracle model ID.
    #[arg(long, env = "SGPA_MODEL")]
    model: Option<String>,

    /// Oracle deadline in seconds.
    #[arg(long, env = "SGPA_ORACLE_TIMEOUT", default_value_t = 30)]
    oracle_timeout: u64,

    /// Path to a text file containing a custom oracle prompt.
    #[arg(long, env = "SGPA_SYSTEM_PROMPT")]
    system_prompt: Option<PathBuf>,

    /// How far total may drift from internal + external in the line heuristic.
    #[arg(long, env = "SGPA_SUM_TOLERANCE", default_value_t = 5)]
    sum_tolerance: u32,

    /// PDF user password for encrypted documents.
    #[arg(long, env = "SGPA_PASSWORD")]
    password: Option<String>,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "SGPA_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Disable the progress spinner.
    #[arg(long, env = "SGPA_NO_PROGRESS")]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Parse(ref args) => run_parse(args, cli.quiet).await,
        Command::Schemes { json } => run_schemes(json),
        Command::Subjects {
            ref search,
            year,
            program,
            json,
        } => run_subjects(search.as_deref(), year, program, json),
        Command::Debug {
            ref input,
            ref password,
        } => {
            let mut builder = ParseConfig::builder().oracle_enabled(false);
            if let Some(pwd) = password {
                builder = builder.password(pwd);
            }
            let config = builder.build().context("Invalid configuration")?;
            let dump = debug_extract(input, &config)
                .await
                .context("Failed to read PDF text")?;
            println!(
                "{}",
                serde_json::to_string_pretty(&dump).context("Failed to serialise output")?
            );
            Ok(())
        }
    }
}

async fn run_parse(args: &ParseArgs, quiet: bool) -> Result<()> {
    let show_progress = !quiet && !args.no_progress && !args.json;
    let progress: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ParseProgressCallback>)
    } else {
        None
    };

    let config = build_config(args, progress).await?;
    let report = parse_result(&args.input, &config)
        .await
        .context("Parsing failed")?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise output")?
        );
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Map CLI args to `ParseConfig`.
async fn build_config(args: &ParseArgs, progress: Option<ProgressCallback>) -> Result<ParseConfig> {
    let mut builder = ParseConfig::builder()
        .maybe_scheme(args.scheme)
        .oracle_enabled(!args.no_oracle)
        .oracle_timeout_secs(args.oracle_timeout)
        .sum_tolerance(args.sum_tolerance)
        .download_timeout_secs(args.download_timeout);

    if let Some(ref path) = args.system_prompt {
        let prompt = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read system prompt from {:?}", path))?;
        builder = builder.system_prompt(prompt);
    }
    if let Some(ref provider) = args.provider {
        builder = builder.provider_name(provider);
    }
    if let Some(ref model) = args.model {
        builder = builder.model(model);
    }
    if let Some(ref pwd) = args.password {
        builder = builder.password(pwd);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

fn print_report(report: &SgpaReport) {
    println!(
        "{}  scheme {}  branch {}  {}",
        bold("VTU result"),
        report.scheme,
        report.branch,
        dim(&format!("via {}", report.strategy))
    );
    println!();
    println!(
        "  {:<10} {:<40} {:>4} {:>4} {:>5} {:>3} {:>3} {:>5}",
        "CODE", "SUBJECT", "INT", "EXT", "TOTAL", "CR", "GR", "RES"
    );
    for rec in report.subjects.values() {
        let result = if rec.result.is_fail() {
            red(rec.result.as_str())
        } else {
            green(rec.result.as_str())
        };
        println!(
            "  {:<10} {:<40} {:>4} {:>4} {:>5} {:>3} {:>3} {:>5}",
            rec.code,
            truncate(&rec.name, 40),
            rec.internal,
            rec.external,
            rec.total,
            rec.credits,
            rec.grade,
            result
        );
    }
    println!();
    println!(
        "  SGPA {}   credits {}   points {}",
        bold(&format!("{:.2}", report.sgpa)),
        report.total_credits,
        report.total_weighted_points
    );
    if report.failed_count > 0 {
        println!(
            "  {} failed: {}",
            red(&report.failed_count.to_string()),
            report.failed_subjects.join(", ")
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }
}

fn run_schemes(json: bool) -> Result<()> {
    let schemes = list_schemes();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&schemes).context("Failed to serialise output")?
        );
        return Ok(());
    }
    for info in &schemes {
        let grades: Vec<String> = info
            .marks_to_grade
            .iter()
            .rev()
            .map(|(marks, grade)| format!("{grade}≥{marks}"))
            .collect();
        println!("{}  {}  {}", bold(info.scheme.as_str()), dim(info.pattern), grades.join(" "));
    }
    Ok(())
}

fn run_subjects(
    search: Option<&str>,
    year: Option<Scheme>,
    program: Option<Program>,
    json: bool,
) -> Result<()> {
    let catalog = StaticCatalog::builtin();

    match (search, year, program) {
        (Some(query), _, _) => {
            let hits = catalog.search(query);
            if json {
                return print_json(&hits);
            }
            if hits.is_empty() {
                eprintln!("No subjects match '{query}'");
            }
            print_entries(&hits);
        }
        (None, Some(scheme), Some(program)) => {
            let listing = catalog.list_by_year_and_program(scheme, program);
            if json {
                return print_json(&listing);
            }
            for (term, entries) in &listing {
                println!("{}", bold(&format!("Term {term}")));
                print_entries(entries);
            }
            println!(
                "{}",
                dim(&format!(
                    "{} credits in total",
                    catalog.total_credits(scheme, program)
                ))
            );
        }
        (None, Some(scheme), None) => {
            let by_program = catalog.list_by_year(scheme);
            if json {
                return print_json(&by_program);
            }
            for (program, listing) in &by_program {
                let count: usize = listing.values().map(Vec::len).sum();
                println!("{}  {count} subjects", bold(program.tag()));
            }
        }
        _ => {
            let rows = fallback_subjects();
            if json {
                return print_json(&rows);
            }
            for row in &rows {
                println!("  {:<10} {:<48} {:>2}", row.code, row.name, row.credits);
            }
        }
    }
    Ok(())
}

fn print_entries(entries: &[&CatalogEntry]) {
    for e in entries {
        println!(
            "  {:<10} {:<48} {:>2}  {}",
            e.code,
            truncate(e.name, 48),
            e.credits,
            dim(e.category)
        );
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialise output")?
    );
    Ok(())
}
