//! Casefile CLI - operations console for the investigation backend.
//!
//! ```text
//! main() -> init_tracing() -> CasefileConfig::load() -> LocalSessionService::open()
//!                                                          |
//!                                 Command::{Show, Wipe, Verify, Help}
//! ```
//!
//! Logs go to `~/.casefile/logs/casefile.log` so they never interleave with
//! command output.

use std::{
    env,
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result, bail};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use casefile_config::CasefileConfig;
use casefile_core::{
    EvidenceCheck, InvestigationDesk, LocalSessionService, OperationsConsole, TeamCredentials,
};

const USAGE: &str = "\
Usage: casefile <command>

Commands:
  show           Print the dossier and the request log
  wipe           Reset the dossier and the request log
  verify <CODE>  Check an evidence code and record it if it is genuine
  help           Show this message";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_casefile_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than mixing logs into command output.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_casefile_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in casefile_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn casefile_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.casefile/logs/casefile.log
    if let Some(home) = casefile_config::casefile_home() {
        candidates.push(home.join("logs").join("casefile.log"));
    }

    // Fallback: ./.casefile/logs/casefile.log
    candidates.push(PathBuf::from(".casefile").join("logs").join("casefile.log"));

    candidates
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show,
    Wipe,
    Verify(String),
    Help,
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        match args {
            [] => Ok(Command::Help),
            [cmd] if cmd == "show" => Ok(Command::Show),
            [cmd] if cmd == "wipe" => Ok(Command::Wipe),
            [cmd] if matches!(cmd.as_str(), "help" | "-h" | "--help") => Ok(Command::Help),
            [cmd, code] if cmd == "verify" => Ok(Command::Verify(code.clone())),
            [cmd] if cmd == "verify" => bail!("verify needs an evidence code\n\n{USAGE}"),
            [cmd, ..] => bail!("unknown command or arguments: {cmd}\n\n{USAGE}"),
        }
    }
}

fn load_config() -> CasefileConfig {
    match CasefileConfig::load() {
        Ok(Some(config)) => config,
        Ok(None) => CasefileConfig::default(),
        Err(err) => {
            eprintln!("Warning: {err}; using defaults");
            CasefileConfig::default()
        }
    }
}

fn open_service(config: &CasefileConfig) -> Result<Arc<LocalSessionService>> {
    let service =
        LocalSessionService::open(config).context("failed to open investigation storage")?;
    Ok(Arc::new(service))
}

async fn run(command: Command, config: &CasefileConfig) -> Result<()> {
    match command {
        Command::Help => {
            println!("{USAGE}");
            if let Some(path) = CasefileConfig::path() {
                println!("\nConfig file: {}", path.display());
            }
        }
        Command::Show => {
            let console = OperationsConsole::from_local(open_service(config)?);
            print!("{}", console.snapshot().await?.render());
        }
        Command::Wipe => {
            let console = OperationsConsole::from_local(open_service(config)?);
            console.wipe().await?;
            println!("Investigation records wiped.");
        }
        Command::Verify(code) => {
            let service = open_service(config)?;
            let rejection_delay = service.latency().rejection;
            let desk = InvestigationDesk::new(
                service,
                TeamCredentials::from_config(config),
                rejection_delay,
            );
            match desk.verify_code(&code).await? {
                EvidenceCheck::Confirmed(entry) => {
                    println!("{}: {} ({})", entry.code, entry.message, entry.title);
                }
                EvidenceCheck::Rejected { code } => {
                    println!("{code}: Wrong code. Invalid, solve the puzzle again.");
                }
                EvidenceCheck::Blank => bail!("evidence code must not be empty"),
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    let config = load_config();

    if let Err(err) = run(command, &config).await {
        tracing::error!("Command failed: {err:#}");
        return Err(err);
    }
    Ok(())
}
