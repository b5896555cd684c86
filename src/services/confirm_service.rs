//! Swap submission: the confirmation step's submit handler.
//!
//! One attempt per call. If no swap exists yet the swap is created (after
//! optional marketplace wallet verification); if one exists its payment is
//! processed. Exactly one of the two happens per attempt. The outcome is
//! returned as a value; the embedder navigates, transitions, or toasts.

use tracing::{info, warn};

use crate::api::models::{CreateSwapRequest, KnownErrorCode};
use crate::api::{SwapApi, WalletVerifier};
use crate::context::SwapContext;
use crate::models::form::SwapFormData;
use crate::models::wizard::{AppSettings, QueryParams, SubmitOutcome, SwapCreateStep};
use crate::services::WizardError;
use crate::utils::errors::toast_message;
use crate::utils::network_settings::ADDRESS_SOURCE_IMX_MARKETPLACE;

/// Run one submission attempt.
///
/// The context's submitting flag is raised for the duration of the attempt
/// and always cleared afterwards, on success and failure alike.
pub async fn submit(
    ctx: &SwapContext,
    api: &dyn SwapApi,
    verifier: &dyn WalletVerifier,
    query: &QueryParams,
    settings: &AppSettings,
) -> SubmitOutcome {
    ctx.set_submitting(true).await;
    let result = run_submission(ctx, api, verifier, query, settings).await;
    ctx.set_submitting(false).await;

    match result {
        Ok(route) => SubmitOutcome::Navigated { route },
        Err(err) => {
            if matches!(known_code(&err), Some(KnownErrorCode::InvalidCredentials)) {
                info!("exchange credentials rejected, redirecting to OAuth step");
                SubmitOutcome::Transition {
                    step: SwapCreateStep::OffRampOAuth,
                }
            } else {
                warn!(error = %err, "swap submission failed");
                SubmitOutcome::Failed {
                    toast: toast_message(&err),
                }
            }
        }
    }
}

fn known_code(err: &WizardError) -> Option<KnownErrorCode> {
    match err {
        WizardError::Api(api_err) => api_err.known_code(),
        _ => None,
    }
}

async fn run_submission(
    ctx: &SwapContext,
    api: &dyn SwapApi,
    verifier: &dyn WalletVerifier,
    query: &QueryParams,
    settings: &AppSettings,
) -> Result<String, WizardError> {
    // A swap already created by a previous attempt only needs its payment
    // processed; never create a second one.
    if let Some(swap) = ctx.swap().await {
        api.process_payment(&swap.id).await?;
        info!(swap_id = %swap.id, "processed payment for existing swap");
        return Ok(format!("/{}", swap.id));
    }

    let form = ctx.form().await;

    if query.address_source.as_deref() == Some(ADDRESS_SOURCE_IMX_MARKETPLACE)
        && settings.valid_signature_present
    {
        ensure_marketplace_wallet_verified(api, verifier, &form, query).await?;
    }

    let request = build_create_request(&form)?;
    let swap = api.create_swap(&request).await?;
    info!(swap_id = %swap.id, "created swap");

    let route = format!("/{}", swap.id);
    ctx.set_swap(swap).await;
    Ok(route)
}

/// Marketplace-sourced destination addresses must be verified network
/// accounts before the swap is created; verification is skipped when the
/// address is already on the verified list.
async fn ensure_marketplace_wallet_verified(
    api: &dyn SwapApi,
    verifier: &dyn WalletVerifier,
    form: &SwapFormData,
    query: &QueryParams,
) -> Result<(), WizardError> {
    let network = form
        .network
        .as_ref()
        .ok_or(WizardError::IncompleteForm("network"))?;

    let accounts = api.get_network_accounts(&network.internal_name).await?;
    let already_verified = query
        .dest_address
        .as_deref()
        .map(|dest| accounts.iter().any(|a| a.address == dest && a.is_verified))
        .unwrap_or(false);

    if !already_verified {
        verifier.verify_wallet(&query.raw_query).await?;
        info!("marketplace wallet verified");
    }
    Ok(())
}

fn build_create_request(form: &SwapFormData) -> Result<CreateSwapRequest, WizardError> {
    let network = form
        .network
        .as_ref()
        .ok_or(WizardError::IncompleteForm("network"))?;
    let exchange = form
        .exchange
        .as_ref()
        .ok_or(WizardError::IncompleteForm("exchange"))?;
    let asset = form
        .asset_uppercase()
        .ok_or(WizardError::IncompleteForm("currency"))?;
    let amount = form.amount.ok_or(WizardError::IncompleteForm("amount"))?;
    let destination_address = form
        .destination_address
        .clone()
        .ok_or(WizardError::IncompleteForm("destination address"))?;

    Ok(CreateSwapRequest {
        source_network: network.internal_name.clone(),
        destination_exchange: exchange.internal_name.clone(),
        asset,
        amount,
        destination_address,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::api::models::{
        ApiError, ApiErrorPayload, ConnectExchangeRequest, NetworkAccount,
    };
    use crate::models::form::{CurrencySelection, ExchangeSelection, NetworkSelection};
    use crate::models::swap::{Swap, SwapStatus};

    /// Mock backend that records calls and can be primed with an error or a
    /// context handle whose submitting flag it observes mid-call.
    #[derive(Default)]
    struct MockApi {
        create_calls: AtomicUsize,
        payment_calls: AtomicUsize,
        accounts_calls: AtomicUsize,
        verify_calls: AtomicUsize,
        fail_with: Mutex<Option<ApiErrorPayload>>,
        accounts: Mutex<Vec<NetworkAccount>>,
        observe_ctx: Mutex<Option<SwapContext>>,
        observed_submitting: AtomicBool,
    }

    impl MockApi {
        fn failing_with(code: Option<&str>, message: Option<&str>) -> Self {
            let mock = Self::default();
            *mock.fail_with.lock().unwrap() = Some(ApiErrorPayload {
                code: code.map(str::to_string),
                message: message.map(str::to_string),
            });
            mock
        }

        async fn note_submitting(&self) {
            let ctx = self.observe_ctx.lock().unwrap().clone();
            if let Some(ctx) = ctx {
                self.observed_submitting
                    .store(ctx.is_submitting().await, Ordering::SeqCst);
            }
        }

        fn primed_error(&self) -> Option<ApiError> {
            self.fail_with
                .lock()
                .unwrap()
                .clone()
                .map(ApiError::Api)
        }
    }

    #[async_trait::async_trait]
    impl SwapApi for MockApi {
        async fn get_deposit_address(
            &self,
            _exchange: &str,
            _asset: &str,
        ) -> Result<String, ApiError> {
            Ok("0xdeposit".to_string())
        }

        async fn create_swap(&self, request: &CreateSwapRequest) -> Result<Swap, ApiError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.note_submitting().await;
            if let Some(err) = self.primed_error() {
                return Err(err);
            }
            Ok(Swap {
                id: "swap-123".to_string(),
                created_date: Utc::now(),
                status: SwapStatus::Created,
                source_network: request.source_network.clone(),
                destination_exchange: request.destination_exchange.clone(),
                asset: request.asset.clone(),
                requested_amount: request.amount,
                destination_address: request.destination_address.clone(),
            })
        }

        async fn process_payment(&self, _swap_id: &str) -> Result<(), ApiError> {
            self.payment_calls.fetch_add(1, Ordering::SeqCst);
            self.note_submitting().await;
            match self.primed_error() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        async fn get_network_accounts(
            &self,
            _network: &str,
        ) -> Result<Vec<NetworkAccount>, ApiError> {
            self.accounts_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.accounts.lock().unwrap().clone())
        }

        async fn connect_exchange(
            &self,
            _request: &ConnectExchangeRequest,
        ) -> Result<(), ApiError> {
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl WalletVerifier for MockApi {
        async fn verify_wallet(&self, _raw_query: &str) -> Result<(), ApiError> {
            self.verify_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn complete_form() -> SwapFormData {
        SwapFormData {
            network: Some(NetworkSelection {
                internal_name: "LOOPRING_MAINNET".to_string(),
                display_name: "Loopring".to_string(),
            }),
            exchange: Some(ExchangeSelection {
                internal_name: "COINBASE".to_string(),
                display_name: "Coinbase".to_string(),
            }),
            currency: Some(CurrencySelection {
                asset: "ETH".to_string(),
            }),
            destination_address: Some("0xdeposit".to_string()),
            amount: Some(0.5),
        }
    }

    fn existing_swap() -> Swap {
        Swap {
            id: "swap-existing".to_string(),
            created_date: Utc::now(),
            status: SwapStatus::Created,
            source_network: "LOOPRING_MAINNET".to_string(),
            destination_exchange: "COINBASE".to_string(),
            asset: "ETH".to_string(),
            requested_amount: 0.5,
            destination_address: "0xdeposit".to_string(),
        }
    }

    #[tokio::test]
    async fn creates_swap_and_navigates_when_no_swap_exists() {
        let ctx = SwapContext::new(complete_form());
        let api = MockApi::default();

        let outcome = submit(
            &ctx,
            &api,
            &api,
            &QueryParams::default(),
            &AppSettings::default(),
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Navigated {
                route: "/swap-123".to_string()
            }
        );
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.payment_calls.load(Ordering::SeqCst), 0);
        assert_eq!(ctx.swap().await.map(|s| s.id).as_deref(), Some("swap-123"));
    }

    #[tokio::test]
    async fn processes_payment_and_navigates_when_swap_exists() {
        let ctx = SwapContext::new(complete_form());
        ctx.set_swap(existing_swap()).await;
        let api = MockApi::default();

        let outcome = submit(
            &ctx,
            &api,
            &api,
            &QueryParams::default(),
            &AppSettings::default(),
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Navigated {
                route: "/swap-existing".to_string()
            }
        );
        assert_eq!(api.payment_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_credentials_transitions_to_oauth_without_toast() {
        let ctx = SwapContext::new(complete_form());
        let api = MockApi::failing_with(Some("INVALID_CREDENTIALS"), None);

        let outcome = submit(
            &ctx,
            &api,
            &api,
            &QueryParams::default(),
            &AppSettings::default(),
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Transition {
                step: SwapCreateStep::OffRampOAuth
            }
        );
    }

    #[tokio::test]
    async fn message_only_error_toasts_exact_message_and_stays() {
        let ctx = SwapContext::new(complete_form());
        let api = MockApi::failing_with(None, Some("Amount is below the minimum"));

        let outcome = submit(
            &ctx,
            &api,
            &api,
            &QueryParams::default(),
            &AppSettings::default(),
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                toast: "Amount is below the minimum".to_string()
            }
        );
    }

    #[tokio::test]
    async fn incomplete_form_fails_without_any_api_call() {
        let ctx = SwapContext::new(SwapFormData::default());
        let api = MockApi::default();

        let outcome = submit(
            &ctx,
            &api,
            &api,
            &QueryParams::default(),
            &AppSettings::default(),
        )
        .await;

        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.payment_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submitting_flag_is_set_during_and_cleared_after_success() {
        let ctx = SwapContext::new(complete_form());
        let api = MockApi::default();
        *api.observe_ctx.lock().unwrap() = Some(ctx.clone());

        submit(
            &ctx,
            &api,
            &api,
            &QueryParams::default(),
            &AppSettings::default(),
        )
        .await;

        assert!(api.observed_submitting.load(Ordering::SeqCst));
        assert!(!ctx.is_submitting().await);
    }

    #[tokio::test]
    async fn submitting_flag_is_cleared_after_failure() {
        let ctx = SwapContext::new(complete_form());
        let api = MockApi::failing_with(None, Some("boom"));
        *api.observe_ctx.lock().unwrap() = Some(ctx.clone());

        submit(
            &ctx,
            &api,
            &api,
            &QueryParams::default(),
            &AppSettings::default(),
        )
        .await;

        assert!(api.observed_submitting.load(Ordering::SeqCst));
        assert!(!ctx.is_submitting().await);
    }

    fn marketplace_query() -> QueryParams {
        QueryParams {
            address_source: Some(ADDRESS_SOURCE_IMX_MARKETPLACE.to_string()),
            dest_address: Some("0xdeposit".to_string()),
            raw_query: "?addressSource=imxMarketplace&destAddress=0xdeposit".to_string(),
        }
    }

    #[tokio::test]
    async fn marketplace_flow_verifies_unknown_wallet() {
        let ctx = SwapContext::new(complete_form());
        let api = MockApi::default();
        let settings = AppSettings {
            valid_signature_present: true,
        };

        submit(&ctx, &api, &api, &marketplace_query(), &settings).await;

        assert_eq!(api.accounts_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.verify_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn marketplace_flow_skips_verification_for_verified_account() {
        let ctx = SwapContext::new(complete_form());
        let api = MockApi::default();
        *api.accounts.lock().unwrap() = vec![NetworkAccount {
            address: "0xdeposit".to_string(),
            is_verified: true,
        }];
        let settings = AppSettings {
            valid_signature_present: true,
        };

        submit(&ctx, &api, &api, &marketplace_query(), &settings).await;

        assert_eq!(api.accounts_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.verify_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn no_verification_without_valid_signature() {
        let ctx = SwapContext::new(complete_form());
        let api = MockApi::default();

        submit(
            &ctx,
            &api,
            &api,
            &marketplace_query(),
            &AppSettings::default(),
        )
        .await;

        assert_eq!(api.accounts_calls.load(Ordering::SeqCst), 0);
        assert_eq!(api.verify_calls.load(Ordering::SeqCst), 0);
    }
}
