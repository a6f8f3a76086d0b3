use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the calling shortcut may do with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    Notification,
    OpenUrl,
    RunShortcut,
    Wait,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub payload: Value,
}

/// The result of a request, as serialized back to the shortcut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

impl Response {
    pub fn success<S: Into<String>>(message: S) -> Response {
        Response {
            success: true,
            message: message.into(),
            data: None,
            action: None,
        }
    }

    pub fn failure<S: Into<String>>(message: S) -> Response {
        Response {
            success: false,
            message: message.into(),
            data: None,
            action: None,
        }
    }

    /// Attaches a payload. Values that cannot be represented as JSON are logged and dropped.
    pub fn with_data<T: Serialize>(mut self, data: &T) -> Response {
        self.data = match serde_json::to_value(data) {
            Ok(x) => Some(x),
            Err(err) => {
                warn!("Dropping response data for {:?}: {}", self.message, err);
                None
            }
        };
        self
    }

    pub fn with_action(mut self, action_type: ActionType, payload: Value) -> Response {
        self.action = Some(Action {
            action_type,
            payload,
        });
        self
    }
}
