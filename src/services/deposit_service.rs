//! Conditional, deduplicated deposit-address fetching.
//!
//! The confirmation step needs the exchange's deposit address only when an
//! exchange is selected and the form has no destination address yet. That
//! condition is expressed as an optional request key: `None` means "do not
//! fetch". Results are cached per key, and because the fetched address is
//! merged into the form, the key collapses to `None` right after a successful
//! fetch, so there is no refetch loop.

use std::collections::HashMap;

use tracing::info;

use crate::api::SwapApi;
use crate::context::SwapContext;
use crate::models::form::SwapFormData;
use crate::services::WizardError;

/// Cache key for one deposit-address request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DepositAddressKey {
    pub exchange: String,
    pub asset: String,
}

/// The request key for the current form state, or `None` when no fetch
/// should happen (no exchange selected, no asset, or address already known)
pub fn deposit_address_key(form: &SwapFormData) -> Option<DepositAddressKey> {
    if form.destination_address.is_some() {
        return None;
    }
    let exchange = form.exchange.as_ref()?;
    let asset = form.asset_uppercase()?;
    Some(DepositAddressKey {
        exchange: exchange.internal_name.clone(),
        asset,
    })
}

/// Per-session fetch state for deposit addresses
#[derive(Default)]
pub struct DepositAddressSync {
    fetched: HashMap<DepositAddressKey, String>,
}

impl DepositAddressSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the request key and fetch-and-merge if it is live.
    ///
    /// Returns the deposit address when one is known after the call, whether
    /// it came from the cache or a fresh fetch; `Ok(None)` means no fetch was
    /// due.
    pub async fn sync(
        &mut self,
        ctx: &SwapContext,
        api: &dyn SwapApi,
    ) -> Result<Option<String>, WizardError> {
        let form = ctx.form().await;
        let Some(key) = deposit_address_key(&form) else {
            return Ok(None);
        };

        if let Some(address) = self.fetched.get(&key) {
            return Ok(Some(address.clone()));
        }

        let address = api.get_deposit_address(&key.exchange, &key.asset).await?;
        self.fetched.insert(key.clone(), address.clone());
        ctx.set_destination_address(address.clone()).await;
        info!(
            exchange = %key.exchange,
            asset = %key.asset,
            "merged exchange deposit address into swap form"
        );
        Ok(Some(address))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::api::models::{
        ApiError, ConnectExchangeRequest, CreateSwapRequest, NetworkAccount,
    };
    use crate::models::form::{CurrencySelection, ExchangeSelection};
    use crate::models::swap::Swap;

    struct FixedAddressApi {
        deposit_calls: AtomicUsize,
    }

    impl FixedAddressApi {
        fn new() -> Self {
            Self {
                deposit_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl SwapApi for FixedAddressApi {
        async fn get_deposit_address(
            &self,
            _exchange: &str,
            _asset: &str,
        ) -> Result<String, ApiError> {
            self.deposit_calls.fetch_add(1, Ordering::SeqCst);
            Ok("0xdeposit".to_string())
        }

        async fn create_swap(&self, _request: &CreateSwapRequest) -> Result<Swap, ApiError> {
            unimplemented!("not used by deposit sync")
        }

        async fn process_payment(&self, _swap_id: &str) -> Result<(), ApiError> {
            unimplemented!("not used by deposit sync")
        }

        async fn get_network_accounts(
            &self,
            _network: &str,
        ) -> Result<Vec<NetworkAccount>, ApiError> {
            unimplemented!("not used by deposit sync")
        }

        async fn connect_exchange(
            &self,
            _request: &ConnectExchangeRequest,
        ) -> Result<(), ApiError> {
            unimplemented!("not used by deposit sync")
        }
    }

    fn form_with_exchange() -> SwapFormData {
        SwapFormData {
            exchange: Some(ExchangeSelection {
                internal_name: "BINANCE".to_string(),
                display_name: "Binance".to_string(),
            }),
            currency: Some(CurrencySelection {
                asset: "usdc".to_string(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn key_is_none_without_exchange() {
        assert!(deposit_address_key(&SwapFormData::default()).is_none());
    }

    #[test]
    fn key_is_none_when_address_already_set() {
        let mut form = form_with_exchange();
        form.destination_address = Some("0xexisting".to_string());
        assert!(deposit_address_key(&form).is_none());
    }

    #[test]
    fn key_uppercases_asset() {
        let key = deposit_address_key(&form_with_exchange()).expect("key");
        assert_eq!(key.asset, "USDC");
        assert_eq!(key.exchange, "BINANCE");
    }

    #[tokio::test]
    async fn fetch_merges_address_and_does_not_refetch() {
        let ctx = SwapContext::new(form_with_exchange());
        let api = FixedAddressApi::new();
        let mut sync = DepositAddressSync::new();

        let address = sync.sync(&ctx, &api).await.expect("sync");
        assert_eq!(address.as_deref(), Some("0xdeposit"));
        assert_eq!(
            ctx.form().await.destination_address.as_deref(),
            Some("0xdeposit")
        );

        // Key is now None (address merged); a second sync must not fetch
        let second = sync.sync(&ctx, &api).await.expect("second sync");
        assert_eq!(second, None);
        assert_eq!(api.deposit_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn skips_fetch_entirely_when_address_preset() {
        let mut form = form_with_exchange();
        form.destination_address = Some("0xuser".to_string());
        let ctx = SwapContext::new(form);
        let api = FixedAddressApi::new();
        let mut sync = DepositAddressSync::new();

        assert_eq!(sync.sync(&ctx, &api).await.expect("sync"), None);
        assert_eq!(api.deposit_calls.load(Ordering::SeqCst), 0);
    }
}
