//! Wizard step identities and typed step outcomes.

use serde::{Deserialize, Serialize};

/// The screens of the swap-creation wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapCreateStep {
    /// Network / exchange / asset / amount entry
    MainForm,
    /// Exchange API-key connection
    ApiKey,
    /// Exchange re-authentication via OAuth after a credential failure
    OffRampOAuth,
    /// Final confirmation and submission
    Confirm,
}

/// What a confirmation submit attempt decided.
///
/// Exactly one variant comes back per attempt; "no transition" is not a
/// default-initialized footgun but simply the absence of the `Transition`
/// variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The swap went through; the embedder should navigate to `route`
    Navigated { route: String },
    /// Recognized credential failure; move the wizard to another step,
    /// showing no error text
    Transition { step: SwapCreateStep },
    /// The attempt failed; show `toast` and stay on the step for a retry
    Failed { toast: String },
}

/// Query parameters the wizard was opened with
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// Where the destination address came from (e.g. a marketplace referral)
    pub address_source: Option<String>,
    pub dest_address: Option<String>,
    /// The raw query string, forwarded as-is to wallet verification
    pub raw_query: String,
}

/// Server-provided settings snapshot relevant to submission
#[derive(Debug, Clone, Copy, Default)]
pub struct AppSettings {
    /// Whether the query string carries a valid marketplace signature
    pub valid_signature_present: bool,
}
