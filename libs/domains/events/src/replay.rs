//! Batch replay of historical raw events through the reconciliation engine.
//!
//! Three entry points share one batching loop: full backfill, date-bounded
//! backfill, and unprocessed-only backfill (which additionally flips the
//! processed flag). Events are paged oldest-first and processed strictly one
//! at a time; a per-event failure is counted and never aborts the batch.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::engine::{NormalizationEngine, Outcome};
use crate::error::{EventError, EventResult};
use crate::repository::{NormalizedStore, RawEventRepository, ReplayFilter};

pub const DEFAULT_BATCH_SIZE: u64 = 500;

/// Final counters returned to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub total: u64,
    pub processed: u64,
    pub errors: u64,
    pub skipped: u64,
}

pub struct ReplayService<S: NormalizedStore, R: RawEventRepository> {
    engine: NormalizationEngine<S>,
    raw_events: Arc<R>,
    batch_size: u64,
}

impl<S: NormalizedStore, R: RawEventRepository> ReplayService<S, R> {
    pub fn new(engine: NormalizationEngine<S>, raw_events: R) -> Self {
        Self::from_arc(engine, Arc::new(raw_events))
    }

    pub fn from_arc(engine: NormalizationEngine<S>, raw_events: Arc<R>) -> Self {
        Self {
            engine,
            raw_events,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Replay every raw event, oldest first.
    pub async fn replay_all(&self) -> EventResult<ReplaySummary> {
        self.run(ReplayFilter::All, false).await
    }

    /// Replay raw events received at or after `since`.
    pub async fn replay_from(&self, since: DateTime<Utc>) -> EventResult<ReplaySummary> {
        self.run(ReplayFilter::From(since), false).await
    }

    /// Replay only events not yet marked processed, flipping the flag on
    /// each event that does not fail.
    pub async fn replay_unprocessed(&self) -> EventResult<ReplaySummary> {
        self.run(ReplayFilter::Unprocessed, true).await
    }

    async fn run(&self, filter: ReplayFilter, mark_processed: bool) -> EventResult<ReplaySummary> {
        let started = Instant::now();
        let expected = self.raw_events.count(filter).await?;
        info!(?filter, expected, batch_size = self.batch_size, "replay started");

        let mut summary = ReplaySummary::default();
        let mut offset: u64 = 0;

        loop {
            let page = self
                .raw_events
                .fetch_page(filter, offset, self.batch_size)
                .await
                .map_err(|err| EventError::Replay(format!("page fetch at {offset}: {err}")))?;
            let fetched = page.len() as u64;
            if fetched == 0 {
                break;
            }

            let mut page_errors: u64 = 0;
            for event in &page {
                summary.total += 1;
                let outcome = self.engine.normalize_event(event).await;
                match outcome {
                    Outcome::Applied => summary.processed += 1,
                    // Deliberate drops count as processed: the event was
                    // seen and needs no retry.
                    Outcome::Skipped => {
                        summary.processed += 1;
                        summary.skipped += 1;
                    }
                    Outcome::Failed => summary.errors += 1,
                }
                metrics::counter!(
                    "normalization_events_total",
                    "outcome" => outcome_label(outcome)
                )
                .increment(1);

                if mark_processed && outcome != Outcome::Failed {
                    if let Err(err) = self.raw_events.mark_processed(event.id).await {
                        warn!(event_id = event.id, error = %err, "failed to mark event processed");
                        summary.processed -= 1;
                        if outcome == Outcome::Skipped {
                            summary.skipped -= 1;
                        }
                        summary.errors += 1;
                        page_errors += 1;
                    }
                } else if outcome == Outcome::Failed {
                    page_errors += 1;
                }
            }

            metrics::counter!("replay_batches_total").increment(1);
            info!(
                total = summary.total,
                processed = summary.processed,
                errors = summary.errors,
                "replay progress"
            );

            // Marking rows processed shrinks the unprocessed filter itself,
            // so only rows that stayed behind (failures) advance the offset.
            offset += if mark_processed { page_errors } else { fetched };

            if fetched < self.batch_size {
                break;
            }
        }

        let elapsed = started.elapsed();
        metrics::histogram!("replay_duration_seconds").record(elapsed.as_secs_f64());
        info!(
            total = summary.total,
            processed = summary.processed,
            errors = summary.errors,
            skipped = summary.skipped,
            elapsed_ms = elapsed.as_millis() as u64,
            "replay finished"
        );
        Ok(summary)
    }
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Applied => "applied",
        Outcome::Skipped => "skipped",
        Outcome::Failed => "failed",
    }
}
