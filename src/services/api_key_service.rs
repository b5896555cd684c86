//! Exchange connection via API key.

use tracing::info;

use crate::api::models::ConnectExchangeRequest;
use crate::api::SwapApi;
use crate::models::form::ExchangeSelection;
use crate::services::WizardError;
use crate::store::{CredentialsVault, ExchangeCredentials};

/// Register the credentials with the backend, then remember them locally.
///
/// The vault write happens only after the backend has accepted the key, so a
/// typo never gets persisted.
pub async fn connect_exchange(
    api: &dyn SwapApi,
    vault: Option<&mut CredentialsVault>,
    exchange: &ExchangeSelection,
    credentials: &ExchangeCredentials,
) -> Result<(), WizardError> {
    let request = ConnectExchangeRequest {
        exchange: exchange.internal_name.clone(),
        api_key: credentials.api_key.clone(),
        api_secret: credentials.api_secret.clone(),
        keyphrase: credentials.keyphrase.clone(),
    };
    api.connect_exchange(&request).await?;
    info!(exchange = %exchange.internal_name, "connected exchange account");

    if let Some(vault) = vault {
        vault.save(&exchange.internal_name, credentials)?;
    }
    Ok(())
}
