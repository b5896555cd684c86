use std::io::{self, Write};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use rampline::api::{InternalApiClient, SwapApiClient};
use rampline::context::SwapContext;
use rampline::models::form::SwapFormData;
use rampline::models::wizard::{AppSettings, QueryParams, SubmitOutcome, SwapCreateStep};
use rampline::services::{confirm_service, DepositAddressSync};
use rampline::steps::api_key;
use rampline::steps::confirm;
use rampline::store::{CredentialsVault, ExchangeCredentials};

fn prompt_line(label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_credentials() -> io::Result<ExchangeCredentials> {
    let api_key = prompt_line("Exchange API key")?;
    let api_secret = prompt_line("Exchange API secret")?;
    let keyphrase = prompt_line("Keyphrase (empty if none)")?;
    Ok(ExchangeCredentials {
        api_key,
        api_secret,
        keyphrase: if keyphrase.is_empty() {
            None
        } else {
            Some(keyphrase)
        },
    })
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("rampline=debug".parse().unwrap()),
        )
        .with_target(true)
        .init();

    info!("Starting rampline swap wizard...");

    let api_token = match std::env::var("RAMPLINE_API_TOKEN") {
        Ok(token) => token,
        Err(_) => {
            error!("RAMPLINE_API_TOKEN not set");
            return;
        }
    };
    let api = match std::env::var("RAMPLINE_API_URL") {
        Ok(url) => SwapApiClient::with_base_url(api_token, url),
        Err(_) => SwapApiClient::new(api_token),
    };
    let internal_url = std::env::var("RAMPLINE_INTERNAL_API_URL")
        .unwrap_or_else(|_| "https://app.rampline.io".to_string());
    let verifier = InternalApiClient::new(internal_url.clone());

    // Swap form prepared on the "main form" step, supplied here as a file
    let form_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "swap_form.json".to_string());
    let form: SwapFormData = match std::fs::read_to_string(&form_path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(form) => form,
            Err(e) => {
                error!("Malformed swap form {}: {}", form_path, e);
                return;
            }
        },
        Err(e) => {
            error!("Failed to read swap form {}: {}", form_path, e);
            return;
        }
    };

    let mut vault = match std::env::var("RAMPLINE_VAULT_KEY") {
        Ok(key_hex) => {
            let path = std::env::var("RAMPLINE_VAULT_PATH")
                .unwrap_or_else(|_| "credentials.json".to_string());
            match CredentialsVault::open(path, key_hex) {
                Ok(vault) => Some(vault),
                Err(e) => {
                    warn!("Could not open credentials vault: {}", e);
                    None
                }
            }
        }
        Err(_) => None,
    };

    let query = QueryParams {
        address_source: std::env::var("RAMPLINE_ADDRESS_SOURCE").ok(),
        dest_address: std::env::var("RAMPLINE_DEST_ADDRESS").ok(),
        raw_query: std::env::var("RAMPLINE_RAW_QUERY").unwrap_or_default(),
    };
    let settings = AppSettings {
        valid_signature_present: std::env::var("RAMPLINE_SIGNATURE_VALID").is_ok(),
    };

    let ctx = SwapContext::new(form);
    info!(session_id = %ctx.session_id().await, "wizard session ready");

    let mut deposit_sync = DepositAddressSync::new();
    let mut step = SwapCreateStep::MainForm;

    loop {
        match step {
            SwapCreateStep::MainForm => {
                // Form entry already happened through the file
                step = SwapCreateStep::ApiKey;
            }

            SwapCreateStep::ApiKey => {
                let Some(prompt) = api_key::api_key_prompt(&ctx.form().await) else {
                    step = SwapCreateStep::Confirm;
                    continue;
                };

                let stored = vault
                    .as_ref()
                    .and_then(|v| v.get(&prompt.exchange.internal_name).ok().flatten());
                let credentials = match stored {
                    Some(credentials) => {
                        info!(
                            exchange = %prompt.exchange.internal_name,
                            "using stored exchange credentials"
                        );
                        credentials
                    }
                    None => {
                        println!("Connect your {} account", prompt.exchange.display_name);
                        match prompt_credentials() {
                            Ok(credentials) => credentials,
                            Err(e) => {
                                error!("Failed to read credentials: {}", e);
                                return;
                            }
                        }
                    }
                };

                match api_key::complete(&api, vault.as_mut(), &prompt, &credentials, || async {
                    Ok(())
                })
                .await
                {
                    Ok(()) => step = SwapCreateStep::Confirm,
                    Err(e) => {
                        error!("Exchange connection failed: {}", e);
                        return;
                    }
                }
            }

            SwapCreateStep::Confirm => {
                if let Err(e) = deposit_sync.sync(&ctx, &api).await {
                    warn!("Deposit address fetch failed: {}", e);
                }

                let view = match confirm::confirmation_view(&ctx.form().await) {
                    Ok(view) => view,
                    Err(e) => {
                        error!("Swap form incomplete: {}", e);
                        return;
                    }
                };

                println!();
                println!(
                    "Swap {} {} from {} to {}",
                    view.amount, view.asset, view.source_network, view.destination_exchange
                );
                println!(
                    "Deposit address: {}",
                    view.destination_address.as_deref().unwrap_or("(pending)")
                );
                if let Some(warning) = &view.warning {
                    println!("Warning: {}", warning.message);
                    if let Some(url) = &warning.guide_url {
                        println!("Learn how: {}", url);
                    }
                }

                let answer = match prompt_line("Confirm swap? [y/N]") {
                    Ok(answer) => answer,
                    Err(e) => {
                        error!("Failed to read confirmation: {}", e);
                        return;
                    }
                };
                if !answer.eq_ignore_ascii_case("y") {
                    info!("Swap cancelled");
                    return;
                }

                match confirm_service::submit(&ctx, &api, &verifier, &query, &settings).await {
                    SubmitOutcome::Navigated { route } => {
                        info!("Swap submitted, track it at {}{}", internal_url, route);
                        return;
                    }
                    SubmitOutcome::Transition { step: next } => step = next,
                    SubmitOutcome::Failed { toast } => {
                        // Stay on the step; the loop offers a retry
                        warn!("{}", toast);
                    }
                }
            }

            SwapCreateStep::OffRampOAuth => {
                error!(
                    "Exchange rejected the stored credentials. Re-authenticate at {}/oauth and run the wizard again",
                    internal_url
                );
                return;
            }
        }
    }
}
