use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::FetchError;
use crate::schedule::types::{Thaw, ThawSchedule, ThawStatus};

/// API error type that marks an address with no redeemable thaws.
/// Remapped to an empty-schedule success, not treated as a failure.
const NO_REDEEMABLE_THAWS: &str = "no_redeemable_thaws";

/// Single schedule fetch. Abstracted so the pipeline can be driven by a
/// mock in tests.
#[async_trait]
pub trait FetchSchedule: Send + Sync {
    async fn fetch_schedule(&self, address: &str) -> Result<ThawSchedule, FetchError>;
}

/// HTTP client for the remote thaw-schedule API.
pub struct ScheduleClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScheduleClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl FetchSchedule for ScheduleClient {
    /// GET {base_url}/thaws/{address}/schedule
    ///
    /// A 400 response whose body carries `{"type":"no_redeemable_thaws"}`
    /// is a success with an empty schedule. Any other 400 body, or any
    /// other non-2xx status, is a hard failure reported as `HTTP {status}`.
    async fn fetch_schedule(&self, address: &str) -> Result<ThawSchedule, FetchError> {
        let url = format!("{}/thaws/{}/schedule", self.base_url, address);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();

        if status.as_u16() == 400 {
            let body: ApiErrorBody = response
                .json()
                .await
                .map_err(|_| FetchError::Status(400))?;
            if body.error_type.as_deref() == Some(NO_REDEEMABLE_THAWS) {
                log::debug!("No redeemable thaws for {}", address);
                return Ok(ThawSchedule::empty());
            }
            return Err(FetchError::Status(400));
        }

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: ScheduleResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(body.into())
    }
}

/// Wire format of a successful schedule response.
#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    #[serde(rename = "numberOfClaimedAllocations", default)]
    number_of_claimed_allocations: u32,
    #[serde(default)]
    thaws: Vec<ThawEntry>,
}

#[derive(Debug, Deserialize)]
struct ThawEntry {
    amount: u64,
    queue_position: Option<u32>,
    status: ThawStatus,
    thawing_period_start: DateTime<Utc>,
    transaction_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type")]
    error_type: Option<String>,
}

impl From<ScheduleResponse> for ThawSchedule {
    fn from(body: ScheduleResponse) -> Self {
        ThawSchedule {
            claimed_count: body.number_of_claimed_allocations,
            thaws: body
                .thaws
                .into_iter()
                .map(|t| Thaw {
                    amount: t.amount,
                    queue_position: t.queue_position,
                    status: t.status,
                    thaw_start: t.thawing_period_start,
                    transaction_id: t.transaction_id,
                })
                .collect(),
        }
    }
}
