//! Wizard step orchestration: the logic behind each step, kept free of any
//! presentation concern so it can be tested against mock APIs.

pub mod api_key_service;
pub mod confirm_service;
pub mod deposit_service;

pub use api_key_service::connect_exchange;
pub use confirm_service::submit;
pub use deposit_service::{deposit_address_key, DepositAddressKey, DepositAddressSync};

use thiserror::Error;

use crate::api::models::ApiError;
use crate::store::StoreError;

/// Errors a wizard service can produce. All are absorbed at the step
/// boundary (toast or step transition); none are fatal to the session.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("swap form is missing {0}")]
    IncompleteForm(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}
