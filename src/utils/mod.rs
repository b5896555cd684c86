pub mod encryption;
pub mod errors;
pub mod network_settings;

pub use errors::toast_message;
pub use network_settings::{known_networks, KnownNetworkSettings, ADDRESS_SOURCE_IMX_MARKETPLACE};
