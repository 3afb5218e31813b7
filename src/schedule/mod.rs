//! Schedule fetch pipeline: the remote API client, the per-address result
//! model and the sequential rate-limited check loop.

pub mod client;
pub mod pipeline;
pub mod types;

pub use client::{FetchSchedule, ScheduleClient};
pub use pipeline::{
    CancelToken, CheckEvent, CheckRun, PipelineSettings, CONSECUTIVE_EMPTY_THRESHOLD,
    INTER_REQUEST_DELAY,
};
pub use types::{AddressResult, ResultState, StoppedEarlyInfo, Thaw, ThawSchedule, ThawStatus};
