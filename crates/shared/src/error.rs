use serde::{Deserialize, Serialize};

/// Failure envelope the backend sends alongside 4xx/5xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: String,
}

impl ApiErrorBody {
    /// Best-effort extraction of the backend's message from a raw body.
    pub fn message_from(body: &str) -> String {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) if !parsed.error.is_empty() => parsed.error,
            _ => body.trim().chars().take(200).collect(),
        }
    }
}
