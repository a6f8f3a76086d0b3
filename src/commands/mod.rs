//! Command handlers
//!
//! `ping` answers immediately. `expense` and `diary` take an `instruction` parameter
//! written in the command language (see [`crate::parser`]); `diary` understands the
//! expense commands plus `report` and `daylog`.
use std::sync::Arc;

use crate::config::Config;
use crate::mail::Mailer;
use crate::registry::CommandRegistry;
use crate::store::ExpenseStore;

mod daylog;
mod expense;
mod instruction;
mod ping;
pub mod report;

pub use instruction::InstructionCommand;
pub use ping::ping;

/// The collaborators the handlers talk to
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn ExpenseStore>,
    pub mailer: Arc<dyn Mailer>,
    pub config: Config,
}

impl Services {
    pub fn new(store: Arc<dyn ExpenseStore>, mailer: Arc<dyn Mailer>, config: Config) -> Self {
        Services {
            store,
            mailer,
            config,
        }
    }
}

/// A registry with every built-in command
pub fn default_registry(services: Services) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register("ping", ping);
    registry.register("expense", InstructionCommand::expense(services.clone()));
    registry.register("diary", InstructionCommand::diary(services));
    registry
}
