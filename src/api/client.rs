use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::models::{
    ApiError, ApiResponse, ConnectExchangeRequest, CreateSwapRequest, NetworkAccount,
};
use super::SwapApi;
use crate::models::swap::Swap;

/// Swap backend API client used by the wizard steps
pub struct SwapApiClient {
    http_client: HttpClient,
    api_token: String,
    base_url: String,
}

impl SwapApiClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.rampline.io";

    /// Create a new client against the production backend
    pub fn new(api_token: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_token,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(api_token: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_token,
            base_url,
        }
    }

    /// Create default headers with authorization
    fn create_headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", self.api_token))
            .map_err(|e| ApiError::InvalidToken(e.to_string()))?;
        headers.insert(AUTHORIZATION, auth_value);

        Ok(headers)
    }

    /// Turn a non-success response into the most specific error available.
    /// The backend usually answers errors with the `{ error: { code, message } }`
    /// envelope regardless of status; fall back to the raw body otherwise.
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body_text) {
            if let Some(payload) = envelope.error {
                return ApiError::Api(payload);
            }
        }

        if (500..600).contains(&status_code) {
            warn!("Server error {}: {}", status_code, body_text);
        }
        ApiError::Http {
            status: status_code,
            body: body_text,
        }
    }

    /// Unwrap a successful response's envelope, surfacing an embedded error
    async fn read_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let envelope = response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| ApiError::Deserialize(e.to_string()))?;

        if let Some(payload) = envelope.error {
            return Err(ApiError::Api(payload));
        }
        envelope.data.ok_or(ApiError::MissingData)
    }

    /// Like `read_data` but for endpoints whose success response carries no body
    async fn read_empty(response: reqwest::Response) -> Result<(), ApiError> {
        let body_text = response.text().await.unwrap_or_default();
        if body_text.trim().is_empty() {
            return Ok(());
        }
        if let Ok(envelope) = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body_text) {
            if let Some(payload) = envelope.error {
                return Err(ApiError::Api(payload));
            }
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let headers = self.create_headers()?;
        let response = self.http_client.get(&url).headers(headers).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }
        Self::read_data(response).await
    }

    async fn post_json<B: serde::Serialize>(
        &self,
        url: String,
        body: &B,
    ) -> Result<reqwest::Response, ApiError> {
        let headers = self.create_headers()?;
        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl SwapApi for SwapApiClient {
    /// GET /api/exchange_accounts/{exchange}/deposit_address/{ASSET}
    ///
    /// Fetches the address the exchange expects funds on. The asset segment is
    /// always uppercased on the wire.
    async fn get_deposit_address(&self, exchange: &str, asset: &str) -> Result<String, ApiError> {
        let url = format!(
            "{}/api/exchange_accounts/{}/deposit_address/{}",
            self.base_url,
            exchange,
            asset.to_uppercase()
        );
        self.get_json(url).await
    }

    /// POST /api/swaps
    ///
    /// Creates a swap from the confirmed form data and returns the server record.
    async fn create_swap(&self, request: &CreateSwapRequest) -> Result<Swap, ApiError> {
        let url = format!("{}/api/swaps", self.base_url);
        let response = self.post_json(url, request).await?;
        Self::read_data(response).await
    }

    /// POST /api/swaps/{id}/process_payment
    ///
    /// Triggers payment processing for an already-created swap.
    async fn process_payment(&self, swap_id: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/swaps/{}/process_payment", self.base_url, swap_id);
        let response = self.post_json(url, &serde_json::json!({})).await?;
        Self::read_empty(response).await
    }

    /// GET /api/networks/{network}/accounts
    async fn get_network_accounts(&self, network: &str) -> Result<Vec<NetworkAccount>, ApiError> {
        let url = format!("{}/api/networks/{}/accounts", self.base_url, network);
        self.get_json(url).await
    }

    /// POST /api/exchange_accounts
    ///
    /// Registers the user's exchange API credentials with the backend.
    async fn connect_exchange(&self, request: &ConnectExchangeRequest) -> Result<(), ApiError> {
        let url = format!("{}/api/exchange_accounts", self.base_url);
        let response = self.post_json(url, request).await?;
        Self::read_empty(response).await
    }
}
