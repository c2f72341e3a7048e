use thiserror::Error;

/// Failure of a call against the back-office REST API
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS...)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status; `message` is the server's message when it sent one
    #[error("Server error {status}: {message}")]
    Http { status: u16, message: String },

    /// 2xx response whose envelope carried `success: false`
    #[error("{0}")]
    Rejected(String),

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Envelope reported success without a payload
    #[error("Response contained no data")]
    MissingData,
}

impl ApiError {
    /// Message worth showing to a user, if the server supplied one
    pub fn user_message(&self) -> Option<String> {
        let message = match self {
            ApiError::Http { message, .. } => message,
            ApiError::Rejected(message) => message,
            ApiError::Network(message) => message,
            ApiError::Decode(_) | ApiError::MissingData => return None,
        };
        let message = message.trim();
        if message.is_empty() {
            None
        } else {
            Some(message.to_string())
        }
    }

    /// [`ApiError::user_message`] or the given fallback
    pub fn message_or(&self, fallback: &str) -> String {
        self.user_message().unwrap_or_else(|| fallback.to_string())
    }

    /// Build an [`ApiError::Http`] from a status and a raw error body.
    ///
    /// Bodies that are an envelope or a Spring error document contribute
    /// their `message`; otherwise the non-empty text is used verbatim and
    /// the status text is the last resort.
    pub fn from_status(status: u16, status_text: &str, body: &str) -> Self {
        let from_json = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|message| message.as_str())
                    .map(str::to_string)
            })
            .filter(|message| !message.trim().is_empty());

        let message = match from_json {
            Some(message) => message,
            None if !body.trim().is_empty() && !body.trim_start().starts_with('{') => {
                body.trim().to_string()
            }
            None => status_text.to_string(),
        };
        ApiError::Http { status, message }
    }

    /// Whether the server refused our credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401, .. })
    }
}
