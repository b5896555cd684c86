//! Confirmation step view model.

use crate::models::form::SwapFormData;
use crate::services::WizardError;
use crate::utils::network_settings;

/// Warning banner shown for networks with known sharp edges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationWarning {
    pub message: String,
    pub guide_url: Option<String>,
}

/// Everything the confirmation panel displays
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationView {
    pub source_network: String,
    pub destination_exchange: String,
    pub asset: String,
    pub amount: f64,
    /// May still be empty while the deposit-address fetch is in flight
    pub destination_address: Option<String>,
    pub warning: Option<ConfirmationWarning>,
}

/// Build the confirmation summary from the form. Requires the selections
/// made on the main form; the destination address may lag behind.
pub fn confirmation_view(form: &SwapFormData) -> Result<ConfirmationView, WizardError> {
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

    let warning = network_settings::for_network(&network.internal_name).and_then(|settings| {
        settings
            .confirmation_warning
            .map(|message| ConfirmationWarning {
                message: message.to_string(),
                guide_url: settings.user_guide_url.map(str::to_string),
            })
    });

    Ok(ConfirmationView {
        source_network: network.display_name.clone(),
        destination_exchange: exchange.display_name.clone(),
        asset,
        amount,
        destination_address: form.destination_address.clone(),
        warning,
    })
}
