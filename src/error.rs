use thiserror::Error;

/// Top-level error type for thawscan operations.
#[derive(Error, Debug)]
pub enum ThawscanError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Derivation failed at index {index}: {source}")]
    Derivation {
        index: u32,
        #[source]
        source: DerivationError,
    },

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Malformed input detected before any network call or key derivation.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Seed phrase is empty")]
    EmptyPhrase,

    #[error("Seed phrase has {0} words; expected 12, 15, 18, 21 or 24")]
    BadWordCount(usize),

    #[error("Word not in BIP-39 wordlist: {0}")]
    UnknownWord(String),

    #[error("Address count {0} out of range; must be between 1 and {1}")]
    CountOutOfRange(u32, u32),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("No addresses to check")]
    NoAddresses,

    #[error("Invalid import JSON: {0}")]
    BadImport(String),
}

/// Failure while deriving the address/key pair at a single index.
/// Aborts the whole derivation batch; no partial list is returned.
#[derive(Error, Debug)]
pub enum DerivationError {
    #[error("BIP32 error: {0}")]
    Bip32(String),

    #[error("Address encoding error: {0}")]
    Encoding(String),

    #[error("Extracted public key is {0} bytes; expected 32")]
    BadKeyLength(usize),
}

/// A single address's schedule request failed. Recorded against that
/// address's result only; never aborts the pipeline.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
