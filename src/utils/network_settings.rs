//! Static knowledge about specific networks and referral sources.
//!
//! Some source networks need a warning shown on the confirmation screen
//! (withdrawing from them to an exchange has sharp edges). Keyed by the
//! network's internal name as the backend reports it.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Internal names of networks the wizard treats specially
pub mod known_networks {
    pub const LOOPRING_MAINNET: &str = "LOOPRING_MAINNET";
    pub const IMMUTABLEX_MAINNET: &str = "IMMUTABLEX_MAINNET";
}

/// `addressSource` query value set by the IMX marketplace referral flow
pub const ADDRESS_SOURCE_IMX_MARKETPLACE: &str = "imxMarketplace";

#[derive(Debug, Clone, Copy)]
pub struct KnownNetworkSettings {
    pub confirmation_warning: Option<&'static str>,
    pub user_guide_url: Option<&'static str>,
}

lazy_static! {
    static ref KNOWN_SETTINGS: HashMap<&'static str, KnownNetworkSettings> = {
        let mut settings = HashMap::new();
        settings.insert(
            known_networks::LOOPRING_MAINNET,
            KnownNetworkSettings {
                confirmation_warning: Some(
                    "Transfers from Loopring L2 must be sent from your Loopring wallet; \
                     exchange deposits from a GameStop wallet need an extra transfer step",
                ),
                user_guide_url: Some(
                    "https://docs.rampline.io/guides/loopring-gamestop-transfer",
                ),
            },
        );
        settings.insert(
            known_networks::IMMUTABLEX_MAINNET,
            KnownNetworkSettings {
                confirmation_warning: Some(
                    "ImmutableX withdrawals can take up to 24 hours to be included in a \
                     rollup batch before the exchange credits them",
                ),
                user_guide_url: None,
            },
        );
        settings
    };
}

/// Settings for a network, if the wizard knows anything special about it
pub fn for_network(internal_name: &str) -> Option<&'static KnownNetworkSettings> {
    KNOWN_SETTINGS.get(internal_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_network_has_warning() {
        let settings = for_network(known_networks::LOOPRING_MAINNET).expect("loopring known");
        assert!(settings.confirmation_warning.is_some());
        assert!(settings.user_guide_url.is_some());
    }

    #[test]
    fn unknown_network_has_no_settings() {
        assert!(for_network("ETHEREUM_MAINNET").is_none());
    }
}
