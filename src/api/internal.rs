use reqwest::Client as HttpClient;

use super::models::{ApiError, ApiResponse};
use super::WalletVerifier;

/// Client for the wizard's own internal API, which fronts wallet verification
/// for marketplace-sourced addresses. Separate from the swap backend and
/// unauthenticated; the signed query string is the proof.
pub struct InternalApiClient {
    http_client: HttpClient,
    base_url: String,
}

impl InternalApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl WalletVerifier for InternalApiClient {
    /// POST /api/wallet/verify{raw_query}
    ///
    /// Forwards the wizard's raw query string untouched; the server validates
    /// the embedded signature and records the wallet as verified.
    async fn verify_wallet(&self, raw_query: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/wallet/verify{}", self.base_url, raw_query);
        let response = self.http_client.post(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body_text = response.text().await.unwrap_or_default();
            if let Ok(envelope) =
                serde_json::from_str::<ApiResponse<serde_json::Value>>(&body_text)
            {
                if let Some(payload) = envelope.error {
                    return Err(ApiError::Api(payload));
                }
            }
            return Err(ApiError::Http {
                status,
                body: body_text,
            });
        }
        Ok(())
    }
}
