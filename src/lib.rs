//! Bulk thaw-schedule checker.
//!
//! Queries a remote API for token "thaw" (vesting) schedules tied to
//! blockchain addresses. Addresses come from one of four input modes
//! (single, bulk text, JSON import, seed-phrase derivation); the fetch
//! pipeline checks them strictly sequentially with a fixed inter-request
//! delay and stops early once enough consecutive addresses turn up empty.

pub mod address;
pub mod config;
pub mod error;
pub mod export;
pub mod schedule;

pub use address::{AddressEntry, DerivedAddress};
pub use config::Config;
pub use error::{DerivationError, FetchError, ThawscanError, ValidationError};
pub use schedule::{
    AddressResult, CancelToken, CheckEvent, CheckRun, FetchSchedule, PipelineSettings,
    ResultState, ScheduleClient, StoppedEarlyInfo, Thaw, ThawSchedule, ThawStatus,
};
