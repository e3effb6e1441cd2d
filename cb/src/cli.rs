//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::ApiConfig;

/// Campaignbrief - chat your way to a campaign brief
#[derive(Parser)]
#[command(
    name = "cb",
    about = "Turn a free-form description of your business into a campaign plan request",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive chat that fills in the brief and generates a plan
    Chat {
        /// First message to send before prompting
        initial: Option<String>,
    },

    /// Run one message against an empty brief, offline
    Extract {
        /// Message text
        text: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Feed each non-empty line of a file as a chat turn
    Replay {
        /// File with one message per line
        file: PathBuf,

        /// Call the plan service once the brief is ready
        #[arg(short, long)]
        submit: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// The `--config` path from raw arguments, read before clap builds the help text
pub fn config_path_from_args<I, S>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString>,
{
    let mut args = args.into_iter().map(Into::into).skip(1);
    while let Some(arg) = args.next() {
        let Some(arg) = arg.to_str() else {
            continue;
        };
        match arg {
            "--" => break,
            "--config" | "-c" => return args.next().map(PathBuf::from),
            _ => {
                if let Some(path) = arg.strip_prefix("--config=") {
                    return Some(PathBuf::from(path));
                }
                if let Some(path) = arg.strip_prefix("-c").filter(|p| !p.is_empty()) {
                    return Some(PathBuf::from(path.strip_prefix('=').unwrap_or(path)));
                }
            }
        }
    }
    None
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("campaignbrief")
        .join("logs")
        .join("cb.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Generate the after_help text with credential status and log location
pub fn generate_after_help(api: &ApiConfig) -> String {
    debug!("generate_after_help: called");
    let mut help = String::new();

    help.push_str("Plan service:\n");
    help.push_str(&format!("  {}\n", api.plan_url()));
    let icon = if api.credentials().is_some() {
        "\u{2705}"
    } else {
        "\u{274C}"
    };
    help.push_str(&format!(
        "  {} credentials from ${} / ${}\n",
        icon, api.username_env, api.password_env
    ));

    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));

    debug!("generate_after_help: returning help text");
    help
}

/// Output format for extract/replay results
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => {
                debug!(%s, "OutputFormat::from_str: unknown format");
                Err(format!("Unknown format: {}. Use: text or json", s))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
