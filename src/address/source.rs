/// Input-mode parsing: single address, bulk text, JSON import, and the
/// bridge from a derivation run to check entries.
use crate::address::{validate_address, AddressEntry, DerivedAddress};
use crate::config::Config;
use crate::error::ValidationError;

/// Single-address mode. Labelled `Address 1`.
pub fn single(address: &str, config: &Config) -> Result<Vec<AddressEntry>, ValidationError> {
    let address = address.trim();
    validate_address(address, &config.address_prefix)?;
    Ok(vec![AddressEntry::new("Address 1", address)])
}

/// Bulk text mode: each non-blank line is either `label,address` (label
/// optional) or a bare address starting with the chain prefix. Lines that
/// fit neither form are skipped with a warning.
pub fn parse_bulk_text(text: &str, config: &Config) -> Result<Vec<AddressEntry>, ValidationError> {
    let mut entries = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (label, address) = match line.split_once(',') {
            Some((label, address)) => (label.trim().to_string(), address.trim()),
            None => (String::new(), line),
        };

        if validate_address(address, &config.address_prefix).is_err() {
            log::warn!("Skipping line without a valid address: {}", line);
            continue;
        }

        let label = if label.is_empty() {
            format!("Address {}", entries.len() + 1)
        } else {
            label
        };
        entries.push(AddressEntry::new(label, address));
    }

    if entries.is_empty() {
        return Err(ValidationError::NoAddresses);
    }
    Ok(entries)
}

/// JSON import mode: an array in the derived-address export format. Only
/// entries whose `bech32` starts with the chain prefix are retained,
/// labeled `Address #{index}`.
pub fn parse_json_import(json: &str, config: &Config) -> Result<Vec<AddressEntry>, ValidationError> {
    let imported: Vec<DerivedAddress> =
        serde_json::from_str(json).map_err(|e| ValidationError::BadImport(e.to_string()))?;

    let entries: Vec<AddressEntry> = imported
        .into_iter()
        .filter(|d| d.bech32.starts_with(&config.address_prefix))
        .map(|d| AddressEntry::new(format!("Address #{}", d.index), d.bech32))
        .collect();

    if entries.is_empty() {
        return Err(ValidationError::NoAddresses);
    }
    Ok(entries)
}

/// Check entries for a freshly derived address list.
pub fn entries_from_derived(derived: &[DerivedAddress]) -> Vec<AddressEntry> {
    derived
        .iter()
        .map(|d| AddressEntry::new(format!("Address #{}", d.index), d.bech32.clone()))
        .collect()
}
