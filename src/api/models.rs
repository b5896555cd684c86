use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard `{ data, error }` envelope the swap backend wraps every response in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error: Option<ApiErrorPayload>,
}

/// Structured error payload from the backend; either field may be absent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorPayload {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl ApiErrorPayload {
    pub fn known_code(&self) -> Option<KnownErrorCode> {
        self.code.as_deref().and_then(KnownErrorCode::from_code)
    }
}

impl std::fmt::Display for ApiErrorPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = self.message.as_deref().filter(|m| !m.is_empty());
        match (message, &self.code) {
            (Some(message), _) => write!(f, "{}", message),
            (None, Some(code)) => write!(f, "API error ({})", code),
            (None, None) => write!(f, "unknown API error"),
        }
    }
}

/// Error codes the wizard reacts to beyond showing the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownErrorCode {
    /// Stored exchange credentials were rejected; the user must re-authenticate
    InvalidCredentials,
}

impl KnownErrorCode {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "INVALID_CREDENTIALS" => Some(Self::InvalidCredentials),
            _ => None,
        }
    }
}

/// Request body for POST /api/swaps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSwapRequest {
    pub source_network: String,
    pub destination_exchange: String,
    pub asset: String,
    pub amount: f64,
    pub destination_address: String,
}

/// A wallet address registered against a network, as listed by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkAccount {
    pub address: String,
    pub is_verified: bool,
}

/// Request body for POST /api/exchange_accounts (connect via API key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectExchangeRequest {
    pub exchange: String,
    pub api_key: String,
    pub api_secret: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyphrase: Option<String>,
}

/// Comprehensive error type for API operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a structured error payload
    #[error("{0}")]
    Api(ApiErrorPayload),
    /// Network-level failure before a response was read
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-success status without a parseable error envelope
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("failed to decode response: {0}")]
    Deserialize(String),
    #[error("response contained no data")]
    MissingData,
    #[error("invalid API token: {0}")]
    InvalidToken(String),
}

impl ApiError {
    /// The recognized error code, if the backend sent one
    pub fn known_code(&self) -> Option<KnownErrorCode> {
        match self {
            ApiError::Api(payload) => payload.known_code(),
            _ => None,
        }
    }
}
