use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::{HasAliases, HasName};

/// The type a flag value is cast to when parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagType {
    String,
    Number,
    Boolean,
    Date,
}

/// A typed flag value
#[derive(Debug, Clone, PartialEq)]
pub enum FlagValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    Date(DateTime<Utc>),
}

impl FlagValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FlagValue::Text(x) => Some(x.as_str()),
            _ => None,
        }
    }
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FlagValue::Number(x) => Some(*x),
            _ => None,
        }
    }
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FlagValue::Boolean(x) => Some(*x),
            _ => None,
        }
    }
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            FlagValue::Date(x) => Some(*x),
            _ => None,
        }
    }
}

impl Display for FlagValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Text(x) => write!(f, "{}", x),
            FlagValue::Number(x) => write!(f, "{}", x),
            FlagValue::Boolean(x) => write!(f, "{}", x),
            FlagValue::Date(x) => write!(f, "{}", x.to_rfc3339()),
        }
    }
}

/// A named argument of a command
#[derive(Debug, Clone, PartialEq)]
pub struct FlagSpec {
    pub name: String,
    pub alias: Option<String>,
    pub flag_type: FlagType,
    pub required: bool,
}

impl FlagSpec {
    pub fn new(name: &str, flag_type: FlagType) -> FlagSpec {
        FlagSpec {
            name: name.to_string(),
            alias: None,
            flag_type,
            required: false,
        }
    }
    pub fn required(mut self) -> FlagSpec {
        self.required = true;
        self
    }
    pub fn alias(mut self, alias: &str) -> FlagSpec {
        self.alias = Some(alias.to_string());
        self
    }
    /// Whether the token (without the `-` marker) selects this flag
    pub fn is_match(&self, token: &str) -> bool {
        self.name == token || self.alias.as_deref() == Some(token)
    }
}

impl HasName for FlagSpec {
    fn get_name(&self) -> &str {
        self.name.as_str()
    }
}

impl HasAliases for FlagSpec {
    fn get_aliases(&self) -> HashSet<&str> {
        self.alias.iter().map(|x| x.as_str()).collect()
    }
}

/// The schema of a command: its name, whether it takes a positional id and its flags
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub name: String,
    pub has_positional_id: bool,
    pub flags: Vec<FlagSpec>,
}

impl CommandSpec {
    pub fn new(name: &str) -> CommandSpec {
        CommandSpec {
            name: name.to_string(),
            has_positional_id: false,
            flags: vec![],
        }
    }

    pub fn with_id(mut self) -> CommandSpec {
        self.has_positional_id = true;
        self
    }

    /// Adds a flag
    ///
    /// Panics if the name or alias of the flag is already taken by another flag of the command,
    /// command tables are built at startup so this is a programming error.
    pub fn flag(mut self, flag: FlagSpec) -> CommandSpec {
        let mut tokens = vec![flag.get_name()];
        tokens.extend(flag.get_aliases());
        for token in tokens {
            if let Some(existing) = self.find_flag(token) {
                panic!(
                    "Repeated flag {} in command {} (already used by {})",
                    token, self.name, existing.name
                );
            }
        }
        self.flags.push(flag);
        self
    }

    /// Looks a flag up by name first, then by alias
    pub fn find_flag(&self, token: &str) -> Option<&FlagSpec> {
        self.flags
            .iter()
            .find(|f| f.name == token)
            .or_else(|| self.flags.iter().find(|f| f.is_match(token)))
    }

    pub fn required_flags(&self) -> impl Iterator<Item = &FlagSpec> {
        self.flags.iter().filter(|f| f.required)
    }
}

impl HasName for CommandSpec {
    fn get_name(&self) -> &str {
        self.name.as_str()
    }
}
