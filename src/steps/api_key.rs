//! API-key step: connect the selected exchange.
//!
//! The step renders nothing at all when no exchange is selected; otherwise it
//! prompts for credentials bound to that exchange and, once the connection
//! succeeds, invokes the wizard's completion callback exactly once.

use std::future::Future;

use crate::api::SwapApi;
use crate::models::form::{ExchangeSelection, SwapFormData};
use crate::services::{api_key_service, WizardError};
use crate::store::{CredentialsVault, ExchangeCredentials};

/// What the step asks the embedder to collect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyPrompt {
    pub exchange: ExchangeSelection,
}

/// The credential prompt for the current form, or `None` when no exchange is
/// selected and the step has nothing to show
pub fn api_key_prompt(form: &SwapFormData) -> Option<ApiKeyPrompt> {
    form.exchange
        .clone()
        .map(|exchange| ApiKeyPrompt { exchange })
}

/// Connect the prompted exchange with the given credentials and run the
/// completion callback on success. The callback is not invoked on failure.
pub async fn complete<F, Fut>(
    api: &dyn SwapApi,
    vault: Option<&mut CredentialsVault>,
    prompt: &ApiKeyPrompt,
    credentials: &ExchangeCredentials,
    on_success: F,
) -> Result<(), WizardError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), WizardError>>,
{
    api_key_service::connect_exchange(api, vault, &prompt.exchange, credentials).await?;
    on_success().await
}
