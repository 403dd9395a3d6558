//! Chat front end: finds a `(janey:<command>)` token in a message and builds the reply.

use crate::core::engine::QueryEngine;
use crate::domain::model::Mode;
use crate::domain::ports::DocumentSource;
use crate::utils::error::{JaneError, Result};
use regex::Regex;

pub const HELP_MESSAGE: &str = "I query the JANE service (http://www.biosemantics.org/jane/), my commands are:\n\
(janey:journals) - a list of recommended journals\n\
(janey:articles) - a list of related articles\n\
(janey:authors) - a list of related authors\n\
(janey:graph) - a mini co-authorship network\n\
(janey:about) - a little info about me\n\
(janey:help) - this message\n";

pub const ABOUT_MESSAGE: &str = "I pass the text of the message I am called from to the \
Journal/Author Name Estimator service and reply with part of what it recommends.\n\
More about JANE: http://www.biosemantics.org/jane/faq.php\n\
For my commands type (janey:help)\n";

pub const UNKNOWN_COMMAND_MESSAGE: &str =
    "Hmm, I'm not sure what you mean, sorry! Try (janey:help) for a list of commands I understand.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    About,
    Query(Mode),
    Unknown(String),
}

impl Command {
    fn from_word(word: &str) -> Self {
        let word = word.to_ascii_lowercase();
        match word.as_str() {
            "help" => Command::Help,
            "about" => Command::About,
            other => other
                .parse::<Mode>()
                .map(Command::Query)
                .unwrap_or_else(|_| Command::Unknown(other.to_string())),
        }
    }
}

/// A recognized command and the exact token it was written as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detected {
    pub command: Command,
    pub token: String,
}

pub struct CommandMatcher {
    pattern: Regex,
}

impl CommandMatcher {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(r"(?i)\(janey:([a-z][a-z]+)\)").map_err(|e| {
            JaneError::ConfigError {
                message: format!("bad command pattern: {}", e),
            }
        })?;
        Ok(Self { pattern })
    }

    /// First command token in `text`, matched case-insensitively.
    pub fn detect(&self, text: &str) -> Option<Detected> {
        let caps = self.pattern.captures(text)?;
        Some(Detected {
            command: Command::from_word(&caps[1]),
            token: caps[0].to_string(),
        })
    }
}

/// Removes every occurrence of `token`; what is left is the query text.
pub fn strip_command(text: &str, token: &str) -> String {
    text.replace(token, "")
}

pub struct ChatBot<S: DocumentSource> {
    matcher: CommandMatcher,
    engine: QueryEngine<S>,
}

impl<S: DocumentSource> ChatBot<S> {
    pub fn new(engine: QueryEngine<S>) -> Result<Self> {
        Ok(Self {
            matcher: CommandMatcher::new()?,
            engine,
        })
    }

    /// Reply for `message`, or `None` when it carries no command token.
    pub async fn reply(&self, message: &str) -> Option<String> {
        let detected = self.matcher.detect(message)?;
        tracing::debug!("Query syntax recognised, command was {:?}", detected.command);

        let reply = match detected.command {
            Command::Help => HELP_MESSAGE.to_string(),
            Command::About => ABOUT_MESSAGE.to_string(),
            Command::Query(mode) => {
                let query = strip_command(message, &detected.token);
                let answer = self.engine.answer(mode, &query).await;
                format!("The {} I would suggest are: \n{}", mode, answer)
            }
            Command::Unknown(word) => {
                tracing::info!("Unknown command: {}", word);
                UNKNOWN_COMMAND_MESSAGE.to_string()
            }
        };

        Some(reply)
    }
}
