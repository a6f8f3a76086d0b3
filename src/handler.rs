//! The webhook entry point
//!
//! A request names a command, optionally carries flat string parameters and must present
//! the shared API key. Transport concerns (sockets, TLS, HTTP framing) live outside this
//! crate; [`Reply::status`] says which HTTP status the transport should use.
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::Config;
use crate::models::Response;
use crate::registry::{CommandRegistry, Parameters};
use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutsRequest {
    pub command: String,
    #[serde(default)]
    pub parameters: Option<Parameters>,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub status: u16,
    pub body: Response,
}

impl Reply {
    /// What the transport answers when the handler could not even be built
    pub fn internal_error() -> Reply {
        Reply {
            status: 500,
            body: Response::failure("An error occurred while processing your request."),
        }
    }
}

pub struct ShortcutsHandler {
    api_key: String,
    registry: CommandRegistry,
}

impl ShortcutsHandler {
    /// Fails if no API key is configured
    pub fn new(config: &Config, registry: CommandRegistry) -> Result<Self, ConfigError> {
        Ok(ShortcutsHandler {
            api_key: config.api_key()?.to_string(),
            registry,
        })
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn validate_request(&self, request: &ShortcutsRequest) -> bool {
        request.api_key == self.api_key
    }

    pub async fn process_command(
        &self,
        command: &str,
        parameters: Option<Parameters>,
    ) -> Response {
        self.registry.dispatch(command, parameters).await
    }

    /// Handles a raw request body
    pub async fn handle_body(&self, body: &str) -> Reply {
        let request: ShortcutsRequest = match serde_json::from_str(body) {
            Ok(x) => x,
            Err(err) => {
                debug!("Invalid request body: {}", err);
                return Reply {
                    status: 400,
                    body: Response::failure("Invalid request format.")
                        .with_data(&json!({ "errors": err.to_string() })),
                };
            }
        };
        if !self.validate_request(&request) {
            warn!("Rejected request for {} with a wrong API key", request.command);
            return Reply {
                status: 401,
                body: Response::failure("Unauthorized."),
            };
        }
        Reply {
            status: 200,
            body: self
                .process_command(&request.command, request.parameters)
                .await,
        }
    }
}
