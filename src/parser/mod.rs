//! Parser module
//!
//! The parser takes an instruction such as `add -desc "Coffee" -cost 3.50 -cat Food`,
//! splits it into words with the tokenizer and interprets them against the command
//! catalog:
//! - the first word is the command name (case insensitive)
//! - for commands working on an existing entity, the second word is its id
//! - the rest are `-flag value` pairs, cast to the type the command declares
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::debug;

use crate::catalog::Catalog;
use crate::models::{CommandSpec, FlagType, FlagValue};
use crate::ParseError;

mod tokenizer;
pub mod utils;

pub use tokenizer::tokenize;

/// The marker that introduces a flag
pub const FLAG_PREFIX: char = '-';

/// A command ready to be executed
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    /// Lower-cased command name
    pub command: String,
    pub id: Option<String>,
    /// Values of the flags that were supplied, keyed by flag name (never by alias)
    pub flags: IndexMap<String, FlagValue>,
}

impl ParsedCommand {
    pub fn flag(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }
    pub fn text(&self, name: &str) -> Option<&str> {
        self.flag(name).and_then(|x| x.as_str())
    }
    pub fn number(&self, name: &str) -> Option<f64> {
        self.flag(name).and_then(|x| x.as_number())
    }
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.flag(name).and_then(|x| x.as_bool())
    }
    pub fn date(&self, name: &str) -> Option<DateTime<Utc>> {
        self.flag(name).and_then(|x| x.as_date())
    }
}

/// Parses instructions against a catalog of commands
#[derive(Debug, Clone, Default)]
pub struct Parser {
    commands: Catalog<CommandSpec>,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            commands: Catalog::new(),
        }
    }

    pub fn with_commands(commands: Vec<CommandSpec>) -> Self {
        let mut parser = Parser::new();
        for command in commands {
            parser.register_command(command);
        }
        parser
    }

    /// Adds a command, replacing any previous command with the same name
    pub fn register_command(&mut self, command: CommandSpec) {
        if let Some(previous) = self.commands.insert(command) {
            debug!("Command {} has been redefined", previous.name);
        }
    }

    pub fn commands(&self) -> &Catalog<CommandSpec> {
        &self.commands
    }

    pub fn parse(&self, input: &str) -> Result<ParsedCommand, ParseError> {
        let tokens = tokenize(input)?;
        let command = tokens[0].to_lowercase();
        let definition = match self.commands.get(&command) {
            Some(x) => x,
            None => return Err(ParseError::UnknownCommand(command)),
        };

        let mut current_index = 1;
        let mut id = None;
        if definition.has_positional_id {
            if tokens.len() < 2 {
                return Err(ParseError::MissingId(command));
            }
            id = Some(tokens[1].clone());
            current_index = 2;
        }

        let mut flags = IndexMap::new();
        while current_index < tokens.len() {
            let token = &tokens[current_index];
            if !token.starts_with(FLAG_PREFIX) {
                return Err(ParseError::InvalidFlagToken(token.clone()));
            }
            let flag_name = &token[FLAG_PREFIX.len_utf8()..];
            let flag = match definition.find_flag(flag_name) {
                Some(x) => x,
                None => return Err(ParseError::UnknownFlag(flag_name.to_string())),
            };

            current_index += 1;
            let value = match tokens.get(current_index) {
                Some(x) => x.as_str(),
                None => return Err(ParseError::MissingFlagValue(flag_name.to_string())),
            };
            let value = match flag.flag_type {
                FlagType::Number => match utils::parse_number(value) {
                    Some(x) => FlagValue::Number(x),
                    None => {
                        return Err(ParseError::InvalidNumber(
                            flag_name.to_string(),
                            value.to_string(),
                        ))
                    }
                },
                FlagType::Date => match utils::parse_str_as_date(value) {
                    Some(x) => FlagValue::Date(x),
                    None => {
                        return Err(ParseError::InvalidDate(
                            flag_name.to_string(),
                            value.to_string(),
                        ))
                    }
                },
                FlagType::Boolean => FlagValue::Boolean(utils::parse_boolean(value)),
                FlagType::String => FlagValue::Text(value.to_string()),
            };
            flags.insert(flag.name.clone(), value);
            current_index += 1;
        }

        for flag in definition.required_flags() {
            if !flags.contains_key(&flag.name) {
                return Err(ParseError::MissingRequiredFlag(flag.name.clone()));
            }
        }

        debug!("Parsed {:?} into {} with {} flags", input, command, flags.len());
        Ok(ParsedCommand { command, id, flags })
    }
}
