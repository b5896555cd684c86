//! User-entered swap form state.

use serde::{Deserialize, Serialize};

/// A source network picked on the main form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSelection {
    pub internal_name: String,
    pub display_name: String,
}

/// A destination exchange picked on the main form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeSelection {
    pub internal_name: String,
    pub display_name: String,
}

/// The asset being swapped, identified by its ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySelection {
    pub asset: String,
}

/// Everything the user has entered so far. Owned by the shared wizard
/// context; individual steps read a snapshot and write back single fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwapFormData {
    pub network: Option<NetworkSelection>,
    pub exchange: Option<ExchangeSelection>,
    pub currency: Option<CurrencySelection>,
    pub destination_address: Option<String>,
    pub amount: Option<f64>,
}

impl SwapFormData {
    /// Asset ticker in the uppercase form the backend expects
    pub fn asset_uppercase(&self) -> Option<String> {
        self.currency.as_ref().map(|c| c.asset.to_uppercase())
    }
}
