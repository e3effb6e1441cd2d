//! Chat REPL session

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use crate::conversation::{Conversation, Exchange};
use crate::domain::{Message, Role};
use crate::session::SessionError;

/// Parsed slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Help,
    Draft,
    Generate,
    Reset,
    History,
    Quit,
    Unknown(String),
}

/// Parse a line starting with `/`
pub fn parse_slash(input: &str) -> SlashCommand {
    let cmd = input.split_whitespace().next().unwrap_or("");
    match cmd {
        "/help" | "/h" => SlashCommand::Help,
        "/draft" | "/d" => SlashCommand::Draft,
        "/generate" | "/g" => SlashCommand::Generate,
        "/reset" | "/clear" => SlashCommand::Reset,
        "/history" => SlashCommand::History,
        "/quit" | "/q" | "/exit" => SlashCommand::Quit,
        other => SlashCommand::Unknown(other.to_string()),
    }
}

enum SlashResult {
    Continue,
    Quit,
}

/// Interactive chat session
pub struct ChatRepl {
    conversation: Conversation,
}

impl ChatRepl {
    pub fn new(conversation: Conversation) -> Self {
        Self { conversation }
    }

    /// Run the chat main loop
    pub async fn run(&mut self, initial: Option<String>) -> Result<()> {
        self.print_welcome();

        if let Some(text) = initial {
            println!("{} {}", ">".bright_green(), text);
            self.send(&text).await;
        }

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", ">".bright_green()));

            match readline {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(input);

                    if input.starts_with('/') {
                        match self.handle_slash_command(input).await {
                            SlashResult::Continue => continue,
                            SlashResult::Quit => break,
                        }
                    } else {
                        self.send(input).await;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Campaign Brief Chat".bright_cyan().bold());
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
        for message in self.conversation.session().messages() {
            print_message(message);
        }
    }

    async fn send(&mut self, text: &str) {
        debug!(text_len = text.len(), "ChatRepl::send: called");
        let result = self.conversation.send(text).await;
        self.show(result);
    }

    fn show(&self, result: Result<Exchange, SessionError>) {
        match result {
            Ok(exchange) => {
                for message in &exchange.replies {
                    print_message(message);
                }
                if let Some(plan) = &exchange.plan {
                    println!();
                    println!("{}", "Plan".bright_cyan().bold());
                    println!("{}", plan.summary.as_deref().unwrap_or("(no summary)"));
                    println!();
                }
                if let Some(path) = &exchange.saved_to {
                    println!("{}", format!("Saved to {}", path.display()).dimmed());
                }
            }
            Err(e) => println!("{} {}", "!".yellow(), e),
        }
    }

    async fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        match parse_slash(input) {
            SlashCommand::Help => {
                self.print_help();
                SlashResult::Continue
            }
            SlashCommand::Quit => SlashResult::Quit,
            SlashCommand::Draft => {
                println!();
                println!("{}", self.conversation.session().draft().summary());
                println!();
                SlashResult::Continue
            }
            SlashCommand::Generate => {
                let result = self.conversation.generate().await;
                self.show(result);
                SlashResult::Continue
            }
            SlashCommand::Reset => {
                self.conversation.reset();
                println!("{}", "Conversation reset.".dimmed());
                for message in self.conversation.session().messages() {
                    print_message(message);
                }
                SlashResult::Continue
            }
            SlashCommand::History => {
                self.print_history();
                SlashResult::Continue
            }
            SlashCommand::Unknown(cmd) => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Show the brief captured so far", "/draft".yellow());
        println!("  {:14} Generate a plan from a complete brief", "/generate".yellow());
        println!("  {:14} Start over", "/reset".yellow());
        println!("  {:14} Show conversation history", "/history".yellow());
        println!("  {:14} Exit", "/quit".yellow());
        println!();
    }

    fn print_history(&self) {
        println!();
        println!("{}", "Conversation History:".bright_cyan());
        for message in self.conversation.session().messages() {
            let role = match message.role {
                Role::User => "You".bright_green(),
                Role::Assistant => "Bot".bright_blue(),
            };
            let preview: String = message.text.chars().take(60).collect();
            let preview = if message.text.chars().count() > 60 {
                format!("{}...", preview)
            } else {
                preview
            };
            println!("  {:>3} {}: {}", message.id, role, preview.replace('\n', " "));
        }
        println!();
    }
}

fn print_message(message: &Message) {
    match message.role {
        Role::Assistant => println!("{} {}", "bot:".bright_blue(), message.text),
        Role::User => println!("{} {}", "you:".bright_green(), message.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slash() {
        assert_eq!(parse_slash("/help"), SlashCommand::Help);
        assert_eq!(parse_slash("/q"), SlashCommand::Quit);
        assert_eq!(parse_slash("/draft please"), SlashCommand::Draft);
        assert_eq!(parse_slash("/generate"), SlashCommand::Generate);
        assert_eq!(parse_slash("/reset"), SlashCommand::Reset);
        assert_eq!(parse_slash("/history"), SlashCommand::History);
        assert_eq!(parse_slash("/nope"), SlashCommand::Unknown("/nope".to_string()));
    }
}
