//! Per-step entry points the wizard loop dispatches to.

pub mod api_key;
pub mod confirm;

pub use api_key::{api_key_prompt, ApiKeyPrompt};
pub use confirm::{confirmation_view, ConfirmationView, ConfirmationWarning};
