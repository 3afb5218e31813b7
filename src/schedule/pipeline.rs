use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::address::AddressEntry;
use crate::schedule::client::FetchSchedule;
use crate::schedule::types::{AddressResult, ResultState, StoppedEarlyInfo};

/// Consecutive addresses with no thaws (or a failed fetch) after which the
/// run stops early. Address lists derived from a seed phrase usually hold
/// far more candidate indices than were ever used on-chain.
pub const CONSECUTIVE_EMPTY_THRESHOLD: u32 = 10;

/// Fixed pause between consecutive schedule fetches. The sole
/// concurrency-control mechanism; requests are never issued in parallel.
pub const INTER_REQUEST_DELAY: Duration = Duration::from_millis(1500);

#[derive(Clone, Debug)]
pub struct PipelineSettings {
    pub consecutive_empty_threshold: u32,
    pub inter_request_delay: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            consecutive_empty_threshold: CONSECUTIVE_EMPTY_THRESHOLD,
            inter_request_delay: INTER_REQUEST_DELAY,
        }
    }
}

/// Shared stop flag, checked at each loop iteration boundary so a
/// user-initiated stop takes effect within one request's latency.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Progress notification emitted as the run advances. `Started` fires
/// before any fetch, with every result still in the loading state.
#[derive(Debug)]
pub enum CheckEvent<'a> {
    Started { results: &'a [AddressResult] },
    AddressCompleted { index: usize, result: &'a AddressResult },
    StoppedEarly(StoppedEarlyInfo),
    Cancelled { checked_count: usize },
    Finished,
}

/// One bulk schedule check. Owns its result sequence and the
/// consecutive-empty counter for the duration of the run; a new run means
/// a new `CheckRun`, discarding prior results.
pub struct CheckRun {
    entries: Vec<AddressEntry>,
    results: Vec<AddressResult>,
    consecutive_empty: u32,
    stopped_early: Option<StoppedEarlyInfo>,
    settings: PipelineSettings,
}

impl CheckRun {
    pub fn new(entries: Vec<AddressEntry>) -> Self {
        Self::with_settings(entries, PipelineSettings::default())
    }

    pub fn with_settings(entries: Vec<AddressEntry>, settings: PipelineSettings) -> Self {
        let results = entries
            .iter()
            .map(|e| AddressResult::loading(&e.address, &e.label))
            .collect();

        Self {
            entries,
            results,
            consecutive_empty: 0,
            stopped_early: None,
            settings,
        }
    }

    /// One result per entry, in entry order, at every point of the run.
    pub fn results(&self) -> &[AddressResult] {
        &self.results
    }

    pub fn stopped_early(&self) -> Option<StoppedEarlyInfo> {
        self.stopped_early
    }

    pub fn into_results(self) -> (Vec<AddressResult>, Option<StoppedEarlyInfo>) {
        (self.results, self.stopped_early)
    }

    /// Run the fetch loop to completion: strictly sequential, one request
    /// at a time, with a fixed cooperative delay between consecutive
    /// fetches and early termination after
    /// `consecutive_empty_threshold` addresses in a row yielded no thaws.
    ///
    /// Failed fetches count toward the threshold exactly like empty
    /// schedules; nothing is retried within a run.
    pub async fn run<F, O>(&mut self, fetcher: &F, cancel: &CancelToken, mut observer: O)
    where
        F: FetchSchedule + ?Sized,
        O: FnMut(CheckEvent<'_>),
    {
        let total = self.entries.len();
        observer(CheckEvent::Started {
            results: &self.results,
        });
        log::info!("Checking thaw schedules for {} addresses", total);

        for i in 0..total {
            if cancel.is_cancelled() {
                log::info!("Check cancelled after {} of {} addresses", i, total);
                self.skip_from(i);
                observer(CheckEvent::Cancelled { checked_count: i });
                return;
            }

            let address = self.entries[i].address.clone();
            log::debug!("Fetching schedule {}/{}: {}", i + 1, total, address);

            match fetcher.fetch_schedule(&address).await {
                Ok(schedule) => {
                    if schedule.has_thaws() {
                        self.consecutive_empty = 0;
                    } else {
                        self.consecutive_empty += 1;
                    }
                    self.results[i].state = ResultState::Fetched { schedule };
                }
                Err(e) => {
                    // Errors count identically to empty results for
                    // termination purposes.
                    self.consecutive_empty += 1;
                    log::warn!("Fetch failed for {}: {}", address, e);
                    self.results[i].state = ResultState::Failed {
                        error: e.to_string(),
                    };
                }
            }

            observer(CheckEvent::AddressCompleted {
                index: i,
                result: &self.results[i],
            });

            let last = i + 1 == total;

            if self.consecutive_empty >= self.settings.consecutive_empty_threshold && !last {
                let info = StoppedEarlyInfo {
                    checked_count: i + 1,
                    total_count: total,
                    consecutive_empty_threshold: self.settings.consecutive_empty_threshold,
                };
                log::info!(
                    "Stopping early: {} consecutive addresses without thaws ({} of {} checked)",
                    self.consecutive_empty,
                    info.checked_count,
                    info.total_count
                );
                self.skip_from(i + 1);
                self.stopped_early = Some(info);
                observer(CheckEvent::StoppedEarly(info));
                return;
            }

            if !last {
                tokio::time::sleep(self.settings.inter_request_delay).await;
            }
        }

        observer(CheckEvent::Finished);
    }

    fn skip_from(&mut self, start: usize) {
        for result in &mut self.results[start..] {
            result.state = ResultState::Skipped;
        }
    }
}
