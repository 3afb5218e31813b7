//! Address source: the `(label, address)` entry model, input-mode parsing
//! and seed-phrase derivation.

pub mod derive;
pub mod source;

use serde::{Deserialize, Serialize};

use crate::config::MIN_ADDRESS_LEN;
use crate::error::ValidationError;

/// One labeled address to check, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEntry {
    pub label: String,
    pub address: String,
}

impl AddressEntry {
    pub fn new(label: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            address: address.into(),
        }
    }
}

/// Address produced by one derivation run; `index` is the derivation path
/// position. Field names follow the JSON import/export format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAddress {
    pub index: u32,
    pub bech32: String,
    #[serde(rename = "publicKeyHex", skip_serializing_if = "Option::is_none")]
    pub public_key_hex: Option<String>,
    #[serde(default)]
    pub registered: bool,
}

/// Syntactic address check applied before any network call: the chain
/// prefix plus a minimum length, nothing more.
pub fn validate_address(address: &str, prefix: &str) -> Result<(), ValidationError> {
    if !address.starts_with(prefix) || address.len() <= MIN_ADDRESS_LEN {
        return Err(ValidationError::InvalidAddress(address.to_string()));
    }
    Ok(())
}
