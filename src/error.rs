use colored::{ColoredString, Colorize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Why an instruction could not be turned into a command
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid command format")]
    EmptyInstruction,
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Command {0} requires an ID")]
    MissingId(String),
    #[error("Invalid flag format at: {0}")]
    InvalidFlagToken(String),
    #[error("Unknown flag: {0}")]
    UnknownFlag(String),
    #[error("Missing value for flag: {0}")]
    MissingFlagValue(String),
    #[error("Invalid number for flag {0}: {1}")]
    InvalidNumber(String, String),
    #[error("Invalid date for flag {0}: {1}")]
    InvalidDate(String, String),
    #[error("Missing required flag: {0}")]
    MissingRequiredFlag(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage snapshot is corrupt: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail delivery failed: {0}")]
    Delivery(String),
    #[error("mail I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
    #[error("Bad config file {file:?}\n{line}")]
    BadInitFile { file: PathBuf, line: String },
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a command handler, caught and reported by dispatch
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Mail(#[from] MailError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError::Message(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError::Message(message.to_string())
    }
}

/// Error shown to the user of the command line front end
#[derive(Debug)]
pub struct Error {
    pub message: Vec<ColoredString>,
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ColoredStrings(&self.message))
    }
}

impl Error {
    pub fn new(message: &str) -> Self {
        Error {
            message: vec![message.bold().bright_red()],
        }
    }
}

impl From<ConfigError> for Error {
    fn from(error: ConfigError) -> Self {
        Error::new(&error.to_string())
    }
}

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        Error::new(&error.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::new(&error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::new(&error.to_string())
    }
}

// https://medium.com/apolitical-engineering/how-do-you-impl-display-for-vec-b8dbb21d814f
struct ColoredStrings<'a>(pub &'a Vec<ColoredString>);

impl<'a> fmt::Display for ColoredStrings<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.iter().fold(Ok(()), |result, partial| {
            result.and_then(|_| write!(f, "{}", partial))
        })
    }
}
