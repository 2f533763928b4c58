//! canvas-triage — run deadline triage over an exported canvas task list.
//!
//! Usage: `canvas-triage --tasks tasks.json [--now 2024-01-01T09:00:00+02:00] "what's overdue?"`
//!
//! Prints the outcome (intent, buckets, highlight, prompt context) as JSON.
//! Set `RUST_LOG=debug` to see resolution details.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use canvas_triage::config::{load_config, load_config_from};
use canvas_triage::error::{TriageError, TriageErrorPayload};
use canvas_triage::types::{Task, TriageRequest};
use canvas_triage::TriageEngine;

#[derive(Debug, Parser)]
#[command(name = "canvas-triage", version, about = "Deadline triage for canvas task cards")]
struct Cli {
    /// JSON file holding an array of task cards
    #[arg(long)]
    tasks: PathBuf,

    /// Requester's local time (ISO-8601). Defaults to server time.
    #[arg(long)]
    now: Option<String>,

    /// Chat agent the message is addressed to
    #[arg(long)]
    agent: Option<String>,

    /// Config file (defaults to ~/.canvas-triage/config.json)
    #[arg(long, env = "CANVAS_TRIAGE_CONFIG")]
    config: Option<PathBuf>,

    /// The chat message
    #[arg(required = true, num_args = 1..)]
    message: Vec<String>,
}

fn run(cli: Cli) -> Result<String, TriageError> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    let content = std::fs::read_to_string(&cli.tasks)?;
    let tasks: Vec<Task> = serde_json::from_str(&content)?;
    log::debug!("Loaded {} tasks from {}", tasks.len(), cli.tasks.display());

    let request = TriageRequest {
        agent_id: cli.agent,
        message: cli.message.join(" "),
        tasks,
        reference_time: cli.now,
    };

    let outcome = TriageEngine::new(config).handle(&request);
    Ok(serde_json::to_string_pretty(&outcome)?)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            let payload = TriageErrorPayload::from(&e);
            eprintln!("{}", payload.recovery_suggestion);
            ExitCode::FAILURE
        }
    }
}
