//! Encrypted on-disk store for connected exchange credentials.
//!
//! A flat JSON file keyed by exchange internal name. API secrets (and the
//! optional keyphrase) are AES-256-GCM blobs under the vault key; the API key
//! id itself is stored in the clear, matching how exchanges display it.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::utils::encryption::{decrypt_secret, encrypt_secret, CryptoError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("vault io: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed vault file: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Plaintext credentials for one exchange account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub keyphrase: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    api_key: String,
    encrypted_secret: String,
    encrypted_keyphrase: Option<String>,
    connected_at: DateTime<Utc>,
}

/// The vault file: one entry per connected exchange
pub struct CredentialsVault {
    path: PathBuf,
    key_hex: String,
    entries: HashMap<String, StoredEntry>,
}

impl CredentialsVault {
    /// Open (or initialize) the vault at `path` with the given hex key
    pub fn open(path: impl Into<PathBuf>, key_hex: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            key_hex: key_hex.into(),
            entries,
        })
    }

    /// Decrypted credentials for an exchange, if it was connected before
    pub fn get(&self, exchange: &str) -> Result<Option<ExchangeCredentials>, StoreError> {
        let Some(entry) = self.entries.get(exchange) else {
            return Ok(None);
        };
        let api_secret = decrypt_secret(&entry.encrypted_secret, &self.key_hex)?;
        let keyphrase = entry
            .encrypted_keyphrase
            .as_deref()
            .map(|blob| decrypt_secret(blob, &self.key_hex))
            .transpose()?;
        Ok(Some(ExchangeCredentials {
            api_key: entry.api_key.clone(),
            api_secret,
            keyphrase,
        }))
    }

    /// Store credentials for an exchange, replacing any previous entry
    pub fn save(
        &mut self,
        exchange: &str,
        credentials: &ExchangeCredentials,
    ) -> Result<(), StoreError> {
        let entry = StoredEntry {
            api_key: credentials.api_key.clone(),
            encrypted_secret: encrypt_secret(&credentials.api_secret, &self.key_hex)?,
            encrypted_keyphrase: credentials
                .keyphrase
                .as_deref()
                .map(|kp| encrypt_secret(kp, &self.key_hex))
                .transpose()?,
            connected_at: Utc::now(),
        };
        self.entries.insert(exchange.to_string(), entry);
        self.persist()?;
        debug!(exchange, "stored exchange credentials in vault");
        Ok(())
    }

    fn persist(&self) -> Result<(), StoreError> {
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}
