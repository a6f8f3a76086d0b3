use serde_json::json;

use crate::models::{ActionType, Response};
use crate::registry::Parameters;
use crate::HandlerError;

/// Health check for the shortcut
pub async fn ping(_parameters: Option<Parameters>) -> Result<Response, HandlerError> {
    Ok(Response::success("pong").with_action(ActionType::Notification, json!("pong")))
}
