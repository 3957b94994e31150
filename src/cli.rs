//! CLI parsing and orchestration. Picks the destination, lists the catalog, mirrors it, and
//! prints the summary. Maps errors to exit codes.

use crate::catalog::{self, CatalogClient, FetchError};
use crate::config::{self, Config, ConfigError};
use crate::mirror::{self, RunOptions};
use crate::model::DownloadResult;
use clap::Parser;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const PROMPT: &str = "Give me the path or leave it empty to use default directory: ";

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Cannot read destination directory: {0}")]
    Prompt(#[source] io::Error),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Cannot access the books list: {0}")]
    Catalog(#[source] FetchError),

    #[error("Cannot write output: {0}")]
    Output(#[source] io::Error),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) | CliRunError::Prompt(_) | CliRunError::Config(_) => 1,
            CliRunError::Catalog(_) => 2,
            CliRunError::Output(_) => 3,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "codernet-mirror")]
#[command(about = "Mirror the PDF books of the codernet.ru catalog into a local directory")]
#[command(
    after_help = "Config file keys (base_url, output_dir, user_agent, timeout_secs) are read from ./codernet-mirror.toml or the user config directory. CLI flags override config."
)]
pub struct Args {
    /// Destination directory. When omitted you are prompted for it.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use the default destination without prompting.
    #[arg(long)]
    pub no_prompt: bool,

    /// Catalog root URL (overrides config).
    #[arg(long)]
    pub base_url: Option<String>,

    /// HTTP User-Agent (overrides config).
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds (overrides config; default: HTTP client default).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// List the catalog and print what would be downloaded without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Suppress the progress bar.
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug logging and full error chain.
    #[arg(long)]
    pub verbose: bool,
}

/// Ask for a destination on `output`, read one line from `input`. Empty input selects
/// `default`.
fn prompt_destination<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: &Path,
) -> io::Result<PathBuf> {
    write!(output, "{}", PROMPT)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim();
    if line.is_empty() {
        Ok(default.to_path_buf())
    } else {
        Ok(PathBuf::from(line))
    }
}

/// Configured output_dir, else the directory containing the running executable.
fn default_destination(config: Option<&Config>) -> PathBuf {
    config
        .and_then(|c| c.output_dir.clone())
        .or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

fn write_summary<W: Write>(out: &mut W, result: &DownloadResult) -> io::Result<()> {
    writeln!(out, "Done, downloaded {} books.", result.downloaded)?;
    if !result.errors.is_empty() {
        writeln!(out, "Errors found: {}", result.errors.len())?;
        for record in &result.errors {
            writeln!(out, "  {}", record)?;
        }
    }
    Ok(())
}

fn write_plan<W: Write>(out: &mut W, planned: &[mirror::PlannedDownload]) -> io::Result<()> {
    for p in planned {
        if p.present {
            writeln!(out, "{} -> {} (present)", p.url, p.path.display())?;
        } else {
            writeln!(out, "{} -> {}", p.url, p.path.display())?;
        }
    }
    let pending = planned.iter().filter(|p| !p.present).count();
    writeln!(out, "Would download {} of {} books.", pending, planned.len())
}

/// Entry point for the CLI. Returns Ok(()) when the run completed, even if some files
/// failed; those are listed in the summary.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let config = config::load_config()?;

    let base_url = args
        .base_url
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.base_url.clone()))
        .unwrap_or_else(|| catalog::DEFAULT_BASE_URL.to_string());
    let timeout_secs = args
        .timeout
        .or_else(|| config.as_ref().and_then(|c| c.timeout_secs));
    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.user_agent.clone()));

    let mut builder = CatalogClient::builder();
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    if let Some(secs) = timeout_secs {
        builder = builder.timeout_secs(secs);
    }
    let mut client = builder
        .build()
        .map_err(|e| CliRunError::InvalidInput(format!("Failed to create HTTP client: {}", e)))?;

    let destination = match &args.output {
        Some(p) => p.clone(),
        None => {
            let default = default_destination(config.as_ref());
            if args.no_prompt {
                default
            } else {
                prompt_destination(&mut io::stdin().lock(), &mut io::stdout(), &default)
                    .map_err(CliRunError::Prompt)?
            }
        }
    };
    tracing::info!(destination = %destination.display(), base_url = %base_url, "starting mirror");

    let entries = catalog::list_entries(&mut client, &base_url).map_err(CliRunError::Catalog)?;
    println!("{} books found.", entries.len());

    if args.dry_run {
        let planned = mirror::plan(&mut client, &base_url, &entries, &destination);
        write_plan(&mut io::stdout().lock(), &planned)
            .map_err(CliRunError::Output)?;
        return Ok(());
    }

    let progress_state: RefCell<Option<indicatif::ProgressBar>> = RefCell::new(None);
    let progress_cb = |done: usize, total: usize| {
        if total == 0 {
            return;
        }
        let mut state = progress_state.borrow_mut();
        let pb = state.get_or_insert_with(|| {
            let bar = indicatif::ProgressBar::new(total as u64);
            if let Ok(style) = indicatif::ProgressStyle::default_bar()
                .template("{spinner} {msg} [{bar:40}] {pos}/{len} ({elapsed})")
            {
                bar.set_style(
                    style
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                        .progress_chars("█▉▊▋▌▍▎▏ "),
                );
            }
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        pb.set_position(done as u64);
        pb.set_message(format!("Book {}/{}", done, total));
    };
    let progress: Option<&dyn Fn(usize, usize)> = if args.quiet { None } else { Some(&progress_cb) };
    let options = RunOptions { progress };

    let result = mirror::run(&mut client, &base_url, &entries, &destination, &options);

    if let Some(pb) = progress_state.borrow_mut().take() {
        pb.disable_steady_tick();
        pb.finish_and_clear();
    }

    write_summary(&mut io::stdout().lock(), &result)
        .map_err(CliRunError::Output)?;
    Ok(())
}
