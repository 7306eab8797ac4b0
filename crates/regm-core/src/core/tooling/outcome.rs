use regm_domain::RegistryError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub status: CommandStatus,
    pub message: String,
    #[serde(default)]
    pub details: Value,
}

impl ExecutionOutcome {
    pub fn success(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::Ok,
            message: message.into(),
            details,
        }
    }

    pub fn failure(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::Failure,
            message: message.into(),
            details,
        }
    }

    pub fn user_error(message: impl Into<String>, details: Value) -> Self {
        Self {
            status: CommandStatus::UserError,
            message: message.into(),
            details,
        }
    }

    /// Shapes a store error into an outcome carrying its code, reason and hint.
    #[must_use]
    pub fn from_registry_error(err: &RegistryError) -> Self {
        let mut details = json!({
            "code": err.code(),
            "reason": err.reason(),
        });
        if let Some(hint) = err.hint() {
            details["hint"] = Value::String(hint);
        }
        if err.is_user_error() {
            Self::user_error(err.to_string(), details)
        } else {
            Self::failure(err.to_string(), details)
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandStatus {
    Ok,
    UserError,
    Failure,
}

impl CommandStatus {
    /// Process exit status for this outcome.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            CommandStatus::Ok => 0,
            CommandStatus::UserError | CommandStatus::Failure => 1,
        }
    }
}
