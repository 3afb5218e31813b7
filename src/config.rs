/// Tool configuration from environment variables
///
/// Controls the schedule API endpoint, the chain address prefix and the
/// BIP44 coin type used for derivation.
use std::env;

/// Maximum number of addresses a single derivation request may ask for.
pub const MAX_DERIVATION_COUNT: u32 = 200;

/// Minimum length of a syntactically acceptable bech32 address.
pub const MIN_ADDRESS_LEN: usize = 16;

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the remote thaw-schedule API
    pub api_url: String,
    /// Bech32 human-readable prefix of chain addresses
    pub address_prefix: String,
    /// BIP44 coin type used in the derivation path
    pub coin_type: u32,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `SCHEDULE_API_URL`: schedule API endpoint (default `http://localhost:3000`)
    /// - `ADDRESS_PREFIX`: bech32 prefix of chain addresses (default `thaw`)
    /// - `COIN_TYPE`: BIP44 coin type for derivation (default `1`)
    pub fn from_env() -> Self {
        let api_url = env::var("SCHEDULE_API_URL").unwrap_or_else(|_| {
            log::info!("📡 Schedule API URL: http://localhost:3000 (default)");
            "http://localhost:3000".to_string()
        });

        let address_prefix = env::var("ADDRESS_PREFIX").unwrap_or_else(|_| "thaw".to_string());

        let coin_type = env::var("COIN_TYPE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| {
                log::debug!("Using default coin type 1");
                1
            });

        Self {
            api_url,
            address_prefix,
            coin_type,
        }
    }

    /// Derivation path for a given account index
    ///
    /// Returns: `m/44'/{coin_type}'/{index}'/0/0`
    pub fn derivation_path(&self, index: u32) -> String {
        format!("m/44'/{}'/{}'/0/0", self.coin_type, index)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            address_prefix: "thaw".to_string(),
            coin_type: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefix() {
        let config = Config::default();
        assert_eq!(config.address_prefix, "thaw");
        assert_eq!(config.coin_type, 1);
    }

    #[test]
    fn test_derivation_path() {
        let config = Config::default();
        assert_eq!(config.derivation_path(0), "m/44'/1'/0'/0/0");
        assert_eq!(config.derivation_path(42), "m/44'/1'/42'/0/0");
    }
}
