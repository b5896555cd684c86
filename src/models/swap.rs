//! Server-side swap records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    Created,
    Initiated,
    Completed,
    Failed,
    Expired,
}

/// A swap as tracked by the backend. Absent from the wizard context until
/// creation succeeds; read-only from the wizard's perspective once present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swap {
    pub id: String,
    pub created_date: DateTime<Utc>,
    pub status: SwapStatus,
    pub source_network: String,
    pub destination_exchange: String,
    pub asset: String,
    pub requested_amount: f64,
    pub destination_address: String,
}
