//! Parsing of the interactive session's input lines.
//!
//! Lines starting with `/` are commands that mirror the settings panel:
//! upload a deck, pick a model, re-run with the current settings, or clear
//! the conversation. `exit` and `quit` leave. Everything else is a chat
//! query about the current summaries.

use deck_core::SummaryModel;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing a command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load a deck from disk, extract it and summarize it.
    Upload(PathBuf),
    /// Change the selected model (takes effect on the next upload or update).
    SelectModel(SummaryModel),
    /// List the supported models.
    ListModels,
    /// Re-run extraction and summarization with the current settings.
    Update,
    /// Clear the chat transcript.
    Reset,
    /// Show usage.
    Help,
    /// Leave the session.
    Exit,
    /// A chat query.
    Chat(String),
}

/// Parse one line of input.
///
/// Command names are case-insensitive; arguments (paths, model names) are
/// taken verbatim.
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(Command::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(Command::Chat(trimmed.to_string()));
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match name.as_str() {
        "/upload" | "/open" => {
            if arg.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/upload".to_string(),
                    usage: "/upload <path/to/deck.pptx>".to_string(),
                })
            } else {
                Ok(Command::Upload(PathBuf::from(arg)))
            }
        }
        "/model" => {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/model".to_string(),
                    usage: format!("/model <{}>", model_choices()),
                });
            }
            arg.parse::<SummaryModel>()
                .map(Command::SelectModel)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/model".to_string(),
                    arg: arg.to_string(),
                })
        }
        "/models" => Ok(Command::ListModels),
        "/update" => Ok(Command::Update),
        "/reset" | "/clear" => Ok(Command::Reset),
        "/help" | "/?" => Ok(Command::Help),
        "/exit" | "/quit" => Ok(Command::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

fn model_choices() -> String {
    SummaryModel::ALL
        .iter()
        .map(SummaryModel::label)
        .collect::<Vec<_>>()
        .join("|")
}

/// Usage text shown by `/help`.
pub fn help_text() -> String {
    format!(
        "Commands:\n\
         \x20 /upload <path>   Upload a .pptx deck and summarize every slide\n\
         \x20 /model <name>    Select the summarization model ({})\n\
         \x20 /models          List the supported models\n\
         \x20 /update          Re-summarize the current deck with the selected model\n\
         \x20 /reset           Clear the conversation (summaries are kept)\n\
         \x20 /help            Show this help\n\
         \x20 exit | quit      Leave\n\
         \n\
         Anything else is a question about a slide, e.g. `2` or `show summary for slide 2`.",
        model_choices()
    )
}
