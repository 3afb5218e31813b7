/// Pipeline behavior tests driven by a scripted in-memory fetcher.
///
/// Time is paused (`start_paused`), so the 1500ms inter-request delays
/// auto-advance instantly while remaining observable on the clock.
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use thawscan::{
    AddressEntry, CancelToken, CheckEvent, CheckRun, FetchError, FetchSchedule, ResultState,
    Thaw, ThawSchedule, ThawStatus,
};

/// What the fetcher should return for one address, in entry order.
#[derive(Clone, Copy)]
enum Scripted {
    Empty,
    Thaws(usize),
    Error,
}

struct ScriptedFetcher {
    script: Vec<Scripted>,
    calls: Mutex<Vec<(String, tokio::time::Instant)>>,
}

impl ScriptedFetcher {
    fn new(script: Vec<Scripted>) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl FetchSchedule for ScriptedFetcher {
    async fn fetch_schedule(&self, address: &str) -> Result<ThawSchedule, FetchError> {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len();
        calls.push((address.to_string(), tokio::time::Instant::now()));

        match self.script[index] {
            Scripted::Empty => Ok(ThawSchedule::empty()),
            Scripted::Thaws(n) => Ok(ThawSchedule {
                claimed_count: 1,
                thaws: (0..n)
                    .map(|i| Thaw {
                        amount: 1_000 * (i as u64 + 1),
                        queue_position: Some(i as u32),
                        status: ThawStatus::Upcoming,
                        thaw_start: Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
                        transaction_id: None,
                    })
                    .collect(),
            }),
            Scripted::Error => Err(FetchError::Status(500)),
        }
    }
}

fn entries(n: usize) -> Vec<AddressEntry> {
    (0..n)
        .map(|i| AddressEntry::new(format!("Address {}", i + 1), format!("thaw1qaddr{:016}", i)))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn preserves_entry_order_and_count() {
    let fetcher = ScriptedFetcher::new(vec![Scripted::Thaws(2), Scripted::Error, Scripted::Empty]);
    let mut run = CheckRun::new(entries(3));

    run.run(&fetcher, &CancelToken::new(), |_| {}).await;

    let results = run.results();
    assert_eq!(results.len(), 3);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.address, format!("thaw1qaddr{:016}", i));
    }
    assert_eq!(results[0].schedule().unwrap().thaws.len(), 2);
    assert_eq!(results[1].error(), Some("HTTP 500"));
    assert!(results[2].schedule().unwrap().thaws.is_empty());
    assert!(run.stopped_early().is_none());
}

#[tokio::test(start_paused = true)]
async fn stops_after_ten_consecutive_empty() {
    // 12 addresses, all empty: the 10th empty result triggers the stop
    let fetcher = ScriptedFetcher::new(vec![Scripted::Empty; 12]);
    let mut run = CheckRun::new(entries(12));

    run.run(&fetcher, &CancelToken::new(), |_| {}).await;

    assert_eq!(fetcher.call_count(), 10);

    let info = run.stopped_early().expect("run should stop early");
    assert_eq!(info.checked_count, 10);
    assert_eq!(info.total_count, 12);
    assert_eq!(info.consecutive_empty_threshold, 10);

    for result in &run.results()[..10] {
        assert!(result.schedule().is_some());
    }
    for result in &run.results()[10..] {
        assert_eq!(result.state, ResultState::Skipped);
        assert!(result.error().is_none());
    }
}

#[tokio::test(start_paused = true)]
async fn errors_count_toward_termination() {
    // Alternating errors and empties still accumulate to the threshold
    let mut script = Vec::new();
    for i in 0..10 {
        script.push(if i % 2 == 0 {
            Scripted::Error
        } else {
            Scripted::Empty
        });
    }
    script.push(Scripted::Thaws(1));

    let fetcher = ScriptedFetcher::new(script);
    let mut run = CheckRun::new(entries(11));

    run.run(&fetcher, &CancelToken::new(), |_| {}).await;

    assert_eq!(fetcher.call_count(), 10);
    assert!(run.stopped_early().is_some());
    assert_eq!(run.results()[10].state, ResultState::Skipped);
}

#[tokio::test(start_paused = true)]
async fn non_empty_success_resets_counter() {
    // [empty x9, thaws, empty x9]: max empty run is 9, never stops early
    let mut script = vec![Scripted::Empty; 9];
    script.push(Scripted::Thaws(1));
    script.extend(vec![Scripted::Empty; 9]);

    let fetcher = ScriptedFetcher::new(script);
    let mut run = CheckRun::new(entries(19));

    run.run(&fetcher, &CancelToken::new(), |_| {}).await;

    assert_eq!(fetcher.call_count(), 19);
    assert!(run.stopped_early().is_none());
    assert!(run.results().iter().all(|r| r.schedule().is_some()));
}

#[tokio::test(start_paused = true)]
async fn threshold_on_last_address_is_not_early() {
    // Exactly 10 addresses, all empty: nothing remains to skip
    let fetcher = ScriptedFetcher::new(vec![Scripted::Empty; 10]);
    let mut run = CheckRun::new(entries(10));

    run.run(&fetcher, &CancelToken::new(), |_| {}).await;

    assert_eq!(fetcher.call_count(), 10);
    assert!(run.stopped_early().is_none());
    assert!(run.results().iter().all(|r| r.schedule().is_some()));
}

#[tokio::test(start_paused = true)]
async fn delays_between_fetches_but_not_after_last() {
    let fetcher = ScriptedFetcher::new(vec![Scripted::Thaws(1); 3]);
    let mut run = CheckRun::new(entries(3));

    let started = tokio::time::Instant::now();
    run.run(&fetcher, &CancelToken::new(), |_| {}).await;
    let elapsed = started.elapsed();

    // Two gaps of 1500ms between three fetches; no trailing delay
    assert_eq!(fetcher.call_count(), 3);
    assert_eq!(elapsed, Duration::from_millis(3000));

    let calls = fetcher.calls.lock().unwrap();
    for pair in calls.windows(2) {
        assert_eq!(pair[1].1 - pair[0].1, Duration::from_millis(1500));
    }
}

#[tokio::test(start_paused = true)]
async fn progress_events_arrive_in_order() {
    let fetcher = ScriptedFetcher::new(vec![Scripted::Thaws(1), Scripted::Empty]);
    let mut run = CheckRun::new(entries(2));

    let mut seen = Vec::new();
    run.run(&fetcher, &CancelToken::new(), |event| match event {
        CheckEvent::Started { results } => {
            assert!(results.iter().all(|r| r.is_loading()));
            seen.push("started".to_string());
        }
        CheckEvent::AddressCompleted { index, result } => {
            assert!(!result.is_loading());
            seen.push(format!("completed:{}", index));
        }
        CheckEvent::Finished => seen.push("finished".to_string()),
        other => panic!("unexpected event: {:?}", other),
    })
    .await;

    assert_eq!(seen, ["started", "completed:0", "completed:1", "finished"]);
}

#[tokio::test(start_paused = true)]
async fn cancellation_skips_remaining_addresses() {
    let fetcher = ScriptedFetcher::new(vec![Scripted::Thaws(1); 5]);
    let mut run = CheckRun::new(entries(5));

    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    let mut cancelled_event = None;
    run.run(&fetcher, &cancel, |event| match event {
        // Request a stop as soon as the second address completes
        CheckEvent::AddressCompleted { index: 1, .. } => trigger.cancel(),
        CheckEvent::Cancelled { checked_count } => cancelled_event = Some(checked_count),
        _ => {}
    })
    .await;

    assert_eq!(fetcher.call_count(), 2);
    assert_eq!(cancelled_event, Some(2));
    assert!(run.results()[..2].iter().all(|r| r.schedule().is_some()));
    assert!(run.results()[2..]
        .iter()
        .all(|r| r.state == ResultState::Skipped));
}
