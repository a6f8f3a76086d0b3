//! Command registry and dispatch
//!
//! The registry maps command names to handlers. Dispatching never fails: an unknown
//! command, a handler error and a handler panic all end up as a `success: false`
//! response.
use async_trait::async_trait;
use futures::FutureExt;
use indexmap::IndexMap;
use log::{debug, error};
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::models::Response;
use crate::HandlerError;

/// The flat parameters sent along with a command
pub type Parameters = HashMap<String, String>;

/// Message used when a failure has nothing better to say
pub const GENERIC_FAILURE: &str = "An error occurred while processing your command";

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, parameters: Option<Parameters>) -> Result<Response, HandlerError>;
}

#[async_trait]
impl<F, Fut> CommandHandler for F
where
    F: Fn(Option<Parameters>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, HandlerError>> + Send + 'static,
{
    async fn handle(&self, parameters: Option<Parameters>) -> Result<Response, HandlerError> {
        self(parameters).await
    }
}

/// Handlers by lower-cased command name
///
/// Registering a name twice replaces the first handler. Registration is expected to
/// happen before the registry is shared; dispatch only reads.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        CommandRegistry {
            commands: IndexMap::new(),
        }
    }

    pub fn register<H: CommandHandler + 'static>(&mut self, command: &str, handler: H) {
        self.commands
            .insert(command.to_lowercase(), Arc::new(handler));
    }

    pub fn get(&self, command: &str) -> Option<Arc<dyn CommandHandler>> {
        self.commands.get(&command.to_lowercase()).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(|x| x.as_str()).collect()
    }

    /// Runs the handler of `command` and normalizes its outcome
    pub async fn dispatch(&self, command: &str, parameters: Option<Parameters>) -> Response {
        let handler = match self.get(command) {
            Some(x) => x,
            None => {
                debug!("No handler for {}", command);
                return Response::failure(format!("Unknown command: {}", command));
            }
        };

        debug!("Dispatching {}", command);
        match AssertUnwindSafe(handler.handle(parameters))
            .catch_unwind()
            .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                error!("Error processing command {}: {}", command, err);
                Response::failure(failure_message(err.to_string()))
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Command {} panicked: {:?}", command, message);
                Response::failure(failure_message(message.unwrap_or_default()))
            }
        }
    }
}

fn failure_message(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        message
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> Option<String> {
    if let Some(x) = panic.downcast_ref::<&str>() {
        Some(x.to_string())
    } else {
        panic.downcast_ref::<String>().cloned()
    }
}
