use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::openapi::{RefOr, Schema};
use utoipa::{PartialSchema, ToSchema, schema};

/// Health report body. One field per dependency the server probes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Status {
    pub database: Value,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ToSchema, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentState {
    Ok,
    Error,
}

/// Probe outcome for one dependency. Serializes as the bare state (`"ok"`,
/// `"error"`) unless a message was attached.
#[derive(Debug, Clone)]
pub struct ComponentStatus {
    state: ComponentState,
    message: Option<Value>,
}

impl ComponentStatus {
    pub fn new(state: ComponentState, message: Option<Value>) -> Self {
        Self { state, message }
    }

    #[must_use]
    pub fn ok() -> Self {
        Self::new(ComponentState::Ok, None)
    }

    #[must_use]
    pub fn error() -> Self {
        Self::new(ComponentState::Error, None)
    }

    #[must_use]
    pub fn from_error_text(message: &str) -> Self {
        Self::new(ComponentState::Error, Some(json!(message)))
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self.state, ComponentState::Ok)
    }

    #[must_use]
    pub fn into_message(self) -> Value {
        self.message.unwrap_or_else(|| {
            // A bare state serializes to a plain string, so this cannot fail.
            serde_json::to_value(self.state).expect("component state serializes to a string")
        })
    }
}

/// Only the outcome is kept; error details belong in the log, not in a body
/// served without authentication.
impl<T, E> From<Result<T, E>> for ComponentStatus {
    fn from(result: Result<T, E>) -> Self {
        result.map_or_else(|_| Self::error(), |_| Self::ok())
    }
}

impl Serialize for ComponentStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let Some(message) = &self.message {
            message.serialize(serializer)
        } else {
            self.state.serialize(serializer)
        }
    }
}

impl PartialSchema for ComponentStatus {
    fn schema() -> RefOr<Schema> {
        schema!(String).into()
    }
}

impl ToSchema for ComponentStatus {}
