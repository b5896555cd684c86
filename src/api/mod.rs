//! HTTP clients for the swap backend and the internal verification API.
//!
//! Wizard services depend on the [`SwapApi`] and [`WalletVerifier`] traits
//! rather than the concrete clients, so step logic can be exercised against
//! in-memory fakes.

pub mod client;
pub mod internal;
pub mod models;

pub use client::SwapApiClient;
pub use internal::InternalApiClient;

use models::{ApiError, ConnectExchangeRequest, CreateSwapRequest, NetworkAccount};

use crate::models::swap::Swap;

/// Operations the wizard performs against the swap backend
#[async_trait::async_trait]
pub trait SwapApi: Send + Sync {
    /// Deposit address of the selected exchange for the given asset ticker
    async fn get_deposit_address(&self, exchange: &str, asset: &str) -> Result<String, ApiError>;

    /// Create a swap from confirmed form data
    async fn create_swap(&self, request: &CreateSwapRequest) -> Result<Swap, ApiError>;

    /// Process payment for an existing swap
    async fn process_payment(&self, swap_id: &str) -> Result<(), ApiError>;

    /// Wallet addresses registered against a network
    async fn get_network_accounts(&self, network: &str) -> Result<Vec<NetworkAccount>, ApiError>;

    /// Register exchange API credentials with the backend
    async fn connect_exchange(&self, request: &ConnectExchangeRequest) -> Result<(), ApiError>;
}

/// Wallet verification through the internal API
#[async_trait::async_trait]
pub trait WalletVerifier: Send + Sync {
    /// Verify the wallet named by the signed raw query string
    async fn verify_wallet(&self, raw_query: &str) -> Result<(), ApiError>;
}
