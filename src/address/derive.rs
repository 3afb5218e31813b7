use std::str::FromStr;

use bech32::{Bech32m, Hrp};
use bip39::{Language, Mnemonic};
use bitcoin::bip32::{DerivationPath, Xpriv};
use bitcoin::hashes::{sha256, Hash};
use bitcoin::secp256k1::{All, Message, Secp256k1};
use bitcoin::Network;

use crate::address::DerivedAddress;
use crate::config::{Config, MAX_DERIVATION_COUNT};
use crate::error::{DerivationError, ThawscanError, ValidationError};

/// Constant payload signed once per index to exercise the derived key and
/// obtain its 32-byte public fingerprint. Must never change: downstream
/// consumers reproduce addresses from the same seed.
const FINGERPRINT_PAYLOAD: &[u8] = b"thawscan-address-fingerprint-v1";

/// Word counts carrying a valid BIP-39 checksum.
const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Validate a seed phrase and return the parsed mnemonic.
///
/// Checksum validation is attempted first. A phrase that fails the
/// checksum but has a valid word count and only wordlist words is still
/// accepted, with a warning: some deployed wallets emit such phrases, but
/// a transcription typo would also pass, so acceptance is logged rather
/// than silent.
pub fn validate_phrase(phrase: &str) -> Result<Mnemonic, ValidationError> {
    let phrase = phrase.trim();
    if phrase.is_empty() {
        return Err(ValidationError::EmptyPhrase);
    }

    let words: Vec<&str> = phrase.split_whitespace().collect();
    if !VALID_WORD_COUNTS.contains(&words.len()) {
        return Err(ValidationError::BadWordCount(words.len()));
    }

    match Mnemonic::parse(phrase) {
        Ok(mnemonic) => Ok(mnemonic),
        Err(_) => {
            let list = Language::English.word_list();
            for word in &words {
                let lowered = word.to_lowercase();
                if !list.iter().any(|candidate| *candidate == lowered) {
                    return Err(ValidationError::UnknownWord(lowered));
                }
            }

            log::warn!(
                "Seed phrase failed checksum validation; accepting because all {} words \
                 are in the wordlist. A transcription typo would derive a different, \
                 valid-looking address tree.",
                words.len()
            );

            let normalized = phrase.to_lowercase();
            Mnemonic::parse_in_normalized_without_checksum_check(Language::English, &normalized)
                .map_err(|e| ValidationError::UnknownWord(e.to_string()))
        }
    }
}

/// Derive `count` addresses from a seed phrase, indices `0..count`.
///
/// Deterministic: the same phrase and index always yield bit-identical
/// `bech32` and `public_key_hex`. Works fully offline. A failure at any
/// index aborts the whole run; no partial list is returned.
pub fn derive_addresses(
    phrase: &str,
    count: u32,
    config: &Config,
) -> Result<Vec<DerivedAddress>, ThawscanError> {
    if count == 0 || count > MAX_DERIVATION_COUNT {
        return Err(ValidationError::CountOutOfRange(count, MAX_DERIVATION_COUNT).into());
    }

    let mnemonic = validate_phrase(phrase)?;
    let seed = mnemonic.to_seed("");
    let secp = Secp256k1::new();

    let master = Xpriv::new_master(Network::Bitcoin, &seed)
        .map_err(|e| ThawscanError::Derivation {
            index: 0,
            source: DerivationError::Bip32(e.to_string()),
        })?;

    let mut derived = Vec::with_capacity(count as usize);
    for index in 0..count {
        let entry = derive_one(&secp, &master, index, config)
            .map_err(|source| ThawscanError::Derivation { index, source })?;
        derived.push(entry);

        if (index + 1) % 10 == 0 {
            log::info!("Derived {}/{} addresses", index + 1, count);
        }
    }

    Ok(derived)
}

fn derive_one(
    secp: &Secp256k1<All>,
    master: &Xpriv,
    index: u32,
    config: &Config,
) -> Result<DerivedAddress, DerivationError> {
    let path = DerivationPath::from_str(&config.derivation_path(index))
        .map_err(|e| DerivationError::Bip32(e.to_string()))?;

    let xpriv = master
        .derive_priv(secp, &path)
        .map_err(|e| DerivationError::Bip32(e.to_string()))?;
    let keypair = xpriv.to_keypair(secp);

    // Sign the fixed payload, then take the 32-byte x-only key from the
    // signing keypair as the public fingerprint.
    let digest = sha256::Hash::hash(FINGERPRINT_PAYLOAD);
    let message = Message::from_digest(digest.to_byte_array());
    let _signature = secp.sign_schnorr_no_aux_rand(&message, &keypair);

    let (xonly, _parity) = keypair.x_only_public_key();
    let key_bytes = xonly.serialize().to_vec();
    if key_bytes.len() != 32 {
        return Err(DerivationError::BadKeyLength(key_bytes.len()));
    }

    let address = encode_address(&config.address_prefix, &key_bytes)?;

    Ok(DerivedAddress {
        index,
        bech32: address,
        public_key_hex: Some(hex::encode(&key_bytes)),
        registered: false,
    })
}

/// Bech32m-encode a public key under the chain's address prefix.
fn encode_address(prefix: &str, key_bytes: &[u8]) -> Result<String, DerivationError> {
    let hrp = Hrp::parse(prefix).map_err(|e| DerivationError::Encoding(e.to_string()))?;
    bech32::encode::<Bech32m>(hrp, key_bytes).map_err(|e| DerivationError::Encoding(e.to_string()))
}
