//! Data models shared across the wizard steps and services.

pub mod form;
pub mod swap;
pub mod wizard;

// Re-export commonly used types for convenience
pub use form::{CurrencySelection, ExchangeSelection, NetworkSelection, SwapFormData};
pub use swap::{Swap, SwapStatus};
pub use wizard::{AppSettings, QueryParams, SubmitOutcome, SwapCreateStep};
