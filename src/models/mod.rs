//! Data model
//!
//! Two families of types live here:
//! - the command schema (flags and commands) that drives the parser
//! - the records handled by the expense and diary commands, and the
//!   response sent back to the shortcut
use std::collections::HashSet;

pub use command::{CommandSpec, FlagSpec, FlagType, FlagValue};
pub use day_log::{DayComment, DayLog, DayLogWrite};
pub use expense::{Category, Expense, ExpenseUpdate, ExpenseView, NewExpense};
pub use report::{CategoryTotal, DateRange, ReportData, Summary};
pub use response::{Action, ActionType, Response};

mod command;
mod day_log;
mod expense;
mod report;
mod response;

pub trait HasName {
    fn get_name(&self) -> &str;
}
pub trait HasAliases {
    fn get_aliases(&self) -> HashSet<&str>;
}
