use crate::api::models::ApiError;
use crate::services::WizardError;

/// Pick the most specific user-facing message for a failed submission.
///
/// Preference order: the server's structured error message, then whatever the
/// error itself renders to (which covers generic errors and raw values).
pub fn toast_message(err: &WizardError) -> String {
    if let WizardError::Api(ApiError::Api(payload)) = err {
        if let Some(message) = payload.message.as_deref() {
            if !message.is_empty() {
                return message.to_string();
            }
        }
    }
    err.to_string()
}
