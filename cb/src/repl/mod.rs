//! Interactive chat for campaignbrief
//!
//! Line-edited chat loop with slash commands, driving a `Conversation`.

mod session;

pub use session::{ChatRepl, SlashCommand, parse_slash};

use eyre::{Context, Result};
use tracing::debug;

use crate::client::create_client;
use crate::config::Config;
use crate::conversation::Conversation;
use crate::session::{Session, SessionOptions};

/// Run the interactive chat
///
/// This is the main entry point for `cb chat`.
pub async fn run_interactive(config: &Config, initial: Option<String>) -> Result<()> {
    debug!("run_interactive: called");
    let client = create_client(&config.api).context("Failed to create plan client")?;

    let session = Session::new(SessionOptions::from(&config.engine));
    let mut conversation = Conversation::new(session, client);
    if config.output.save_plans {
        conversation = conversation.with_plans_dir(config.output.plans_path());
    }

    let mut repl = ChatRepl::new(conversation);
    repl.run(initial).await
}
