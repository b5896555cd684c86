//! Shared wizard state.
//!
//! One context lives for the whole wizard session. Steps never hold the lock
//! across an await on a network call: they read a snapshot, do their work,
//! and write back the single field they own.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::form::SwapFormData;
use crate::models::swap::Swap;

#[derive(Debug)]
struct WizardData {
    session_id: Uuid,
    form: SwapFormData,
    swap: Option<Swap>,
    submitting: bool,
}

/// Handle to the wizard session state, cheap to clone
#[derive(Debug, Clone)]
pub struct SwapContext {
    inner: Arc<RwLock<WizardData>>,
}

impl SwapContext {
    pub fn new(form: SwapFormData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(WizardData {
                session_id: Uuid::new_v4(),
                form,
                swap: None,
                submitting: false,
            })),
        }
    }

    pub async fn session_id(&self) -> Uuid {
        self.inner.read().await.session_id
    }

    /// Snapshot of the current form state
    pub async fn form(&self) -> SwapFormData {
        self.inner.read().await.form.clone()
    }

    /// The created swap, if submission has already produced one
    pub async fn swap(&self) -> Option<Swap> {
        self.inner.read().await.swap.clone()
    }

    /// Merge a fetched deposit address into the form
    pub async fn set_destination_address(&self, address: String) {
        self.inner.write().await.form.destination_address = Some(address);
    }

    pub async fn set_swap(&self, swap: Swap) {
        self.inner.write().await.swap = Some(swap);
    }

    pub async fn set_submitting(&self, submitting: bool) {
        self.inner.write().await.submitting = submitting;
    }

    /// Whether a submission attempt is in flight. Only drives button
    /// disablement in an embedder; it is not a re-entrancy guard.
    pub async fn is_submitting(&self) -> bool {
        self.inner.read().await.submitting
    }
}
