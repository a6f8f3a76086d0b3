use indexmap::map::Values;
use indexmap::IndexMap;
use std::fmt::Debug;

use crate::models::{CommandSpec, FlagSpec, FlagType, HasName};

/// A case insensitive table of named things
///
/// Keys are the lower-cased names. Inserting an element whose name is already present
/// replaces the previous one: several call sites may register overlapping command sets
/// (for example the expense commands and the diary commands) and the last registration
/// is the one that counts.
///
/// The table is meant to be filled at startup and only read afterwards. Callers that
/// insert while other threads read must serialize the access themselves.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    list: IndexMap<String, T>,
}

impl<T: HasName + Debug> Catalog<T> {
    pub fn new() -> Self {
        Catalog {
            list: IndexMap::new(),
        }
    }

    /// Inserts an ```element```, returning the one it replaces
    pub fn insert(&mut self, element: T) -> Option<T> {
        let name = element.get_name().to_lowercase();
        self.list.insert(name, element)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.list.get(&name.to_lowercase())
    }

    pub fn values(&self) -> Values<'_, String, T> {
        self.list.values()
    }
    pub fn len(&self) -> usize {
        self.list.len()
    }
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<T: HasName + Debug> Default for Catalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HasName + Debug> Extend<T> for Catalog<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

/// Commands that operate on expenses
pub fn expense_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("add")
            .flag(FlagSpec::new("desc", FlagType::String).required())
            .flag(FlagSpec::new("cost", FlagType::Number).required())
            .flag(FlagSpec::new("cat", FlagType::String))
            .flag(FlagSpec::new("date", FlagType::Date)),
        CommandSpec::new("update")
            .with_id()
            .flag(FlagSpec::new("desc", FlagType::String))
            .flag(FlagSpec::new("cost", FlagType::Number))
            .flag(FlagSpec::new("cat", FlagType::String)),
        CommandSpec::new("delete").with_id(),
    ]
}

/// The expense commands plus reports and day logs
pub fn diary_commands() -> Vec<CommandSpec> {
    let mut commands = expense_commands();
    commands.push(
        CommandSpec::new("report")
            .flag(FlagSpec::new("from", FlagType::Date).required())
            .flag(FlagSpec::new("to", FlagType::Date))
            .flag(FlagSpec::new("export", FlagType::Boolean)),
    );
    commands.push(
        CommandSpec::new("daylog")
            .flag(FlagSpec::new("stars", FlagType::Number).required())
            .flag(FlagSpec::new("text", FlagType::String).required())
            .flag(FlagSpec::new("date", FlagType::Date)),
    );
    commands
}
