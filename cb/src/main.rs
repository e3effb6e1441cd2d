//! Campaignbrief - chat your way to a campaign brief
//!
//! CLI entry point for the interactive chat and the offline extract/replay tools.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, FromArgMatches};
use eyre::{Context, Result};
use tracing::{debug, info};

use campaignbrief::cli::{Cli, Command, OutputFormat, config_path_from_args, generate_after_help};
use campaignbrief::client::create_client;
use campaignbrief::config::Config;
use campaignbrief::conversation::Conversation;
use campaignbrief::extract::extract_turn;
use campaignbrief::merge::merge;
use campaignbrief::questions::{next_question, readiness};
use campaignbrief::repl;
use campaignbrief::session::{Session, SessionOptions};
use campaignbrief::{Draft, Message, PlanResponse, Role};

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("campaignbrief")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = match cli_log_level.map(|s| s.to_uppercase()) {
        None => tracing::Level::INFO,
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
    };

    let log_file = fs::File::create(log_dir.join("cb.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Help is rendered before logging starts, so a bad config falls back to defaults here
    let help_config = config_path_from_args(std::env::args_os());
    let api = Config::load(help_config.as_ref()).map(|c| c.api).unwrap_or_default();
    let cmd = Cli::command().after_help(generate_after_help(&api));
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Chat { initial }) => {
            debug!("main: matched Chat command");
            repl::run_interactive(&config, initial).await
        }
        Some(Command::Extract { text, format }) => {
            debug!(?format, "main: matched Extract command");
            cmd_extract(&config, &text, format)
        }
        Some(Command::Replay { file, submit, format }) => {
            debug!(?file, submit, ?format, "main: matched Replay command");
            cmd_replay(&config, &file, submit, format).await
        }
        None => {
            debug!("main: no command specified, printing help");
            Cli::command().after_help(generate_after_help(&config.api)).print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Run one message against an empty brief
fn cmd_extract(config: &Config, text: &str, format: OutputFormat) -> Result<()> {
    debug!(text_len = text.len(), "cmd_extract: called");
    let limits = config.engine.limits();
    let extraction = extract_turn(text, &limits);
    let draft = merge(&Draft::default(), &extraction, &limits);

    match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "extraction": extraction,
                "draft": draft,
                "readiness": readiness(&draft),
                "nextQuestion": next_question(&draft).map(|q| q.prompt()),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_brief(&draft),
    }
    Ok(())
}

/// Feed each non-empty line of a file as a turn
async fn cmd_replay(config: &Config, file: &Path, submit: bool, format: OutputFormat) -> Result<()> {
    debug!(file = %file.display(), submit, "cmd_replay: called");
    let content = fs::read_to_string(file).context(format!("Failed to read {}", file.display()))?;
    let turns: Vec<&str> = content.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    // Replay never submits mid-way; the whole file is one brief
    let options = SessionOptions {
        auto_submit: false,
        ..SessionOptions::from(&config.engine)
    };
    let mut session = Session::new(options);
    for turn in &turns {
        session = session.submit_turn(turn)?.session;
    }

    let mut plan: Option<PlanResponse> = None;
    let mut saved_to: Option<PathBuf> = None;
    if submit && session.readiness().is_ready() {
        let client = create_client(&config.api).context("Failed to create plan client")?;
        let mut conversation = Conversation::new(session.clone(), client);
        if config.output.save_plans {
            conversation = conversation.with_plans_dir(config.output.plans_path());
        }
        let exchange = conversation.generate().await?;
        plan = exchange.plan;
        saved_to = exchange.saved_to;
        session = conversation.session().clone();
    } else if submit {
        info!("cmd_replay: brief incomplete, not submitting");
    }

    match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "turns": turns.len(),
                "draft": session.draft(),
                "readiness": session.readiness(),
                "nextQuestion": session.next_question().map(|q| q.prompt()),
                "lastError": session.last_error(),
                "plan": plan,
                "savedTo": saved_to,
                "transcript": session.messages(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            for message in session.messages() {
                print_message(message);
            }
            println!();
            print_brief(session.draft());
            if let Some(plan) = &plan {
                println!();
                println!("Plan: {}", plan.summary.as_deref().unwrap_or("(no summary)"));
            }
            if let Some(path) = &saved_to {
                println!("Saved to {}", path.display());
            }
        }
    }

    if submit && let Some(error) = session.last_error() {
        eyre::bail!("Plan generation failed ({}): {}", error.category, error.message);
    }
    Ok(())
}

fn print_brief(draft: &Draft) {
    println!("{}", draft.summary());
    println!();
    let ready = readiness(draft).is_ready();
    println!("Ready: {}", if ready { "yes" } else { "no" });
    if let Some(question) = next_question(draft) {
        println!("Next: {}", question.prompt());
    }
}

fn print_message(message: &Message) {
    let who = match message.role {
        Role::User => "you",
        Role::Assistant => "bot",
    };
    println!("{}: {}", who, message.text);
}
