// Copyright 2026 The leitwort authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The background batch runner: applies a per-item remote operation across
//! many items with durable progress. State is flushed to the repository
//! after every item, so an interruption (the host process being suspended
//! and killed) loses at most one item's worth of work and the batch
//! resumes at the persisted cursor. Cancellation is advisory and checked
//! only between items.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use serde::Deserialize;
use serde::Serialize;

use leitwort_core::ItemId;

use crate::error::Fallible;
use crate::error::fail;
use crate::store::ItemOperation;

/// A failure recorded against one item. Inspectable during and after the
/// run; never aborts the batch.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BatchItemError {
    pub item: ItemId,
    pub message: String,
}

/// The persisted, resumable state of one batch job. The only entity in
/// this crate that must survive process interruption.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BatchJobState {
    pub items: Vec<ItemId>,
    /// Index of the next item to process.
    pub cursor: usize,
    pub processed: usize,
    pub created: usize,
    pub cost: f64,
    pub errors: Vec<BatchItemError>,
    pub cancel_requested: bool,
}

impl BatchJobState {
    pub fn new(items: Vec<ItemId>) -> Self {
        Self {
            items,
            cursor: 0,
            processed: 0,
            created: 0,
            cost: 0.0,
            errors: Vec::new(),
            cancel_requested: false,
        }
    }
}

/// Durable storage for the batch job state, decoupled from any particular
/// persistence technology. There is at most one job at a time.
pub trait JobStateRepository {
    fn load(&self) -> Fallible<Option<BatchJobState>>;
    fn save(&self, state: &BatchJobState) -> Fallible<()>;
    fn clear(&self) -> Fallible<()>;
}

/// Advisory cancellation flag, shared with whatever drives the UI.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn request_cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BatchStatus {
    Completed,
    Cancelled,
}

/// How a run ended, with the final counters.
#[derive(Clone, PartialEq, Debug)]
pub struct BatchReport {
    pub status: BatchStatus,
    pub processed: usize,
    pub created: usize,
    pub cost: f64,
    pub errors: Vec<BatchItemError>,
}

pub struct BatchRunner<R: JobStateRepository> {
    repo: R,
}

impl<R: JobStateRepository> BatchRunner<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persist a fresh job. Refuses to clobber an unfinished one: the
    /// caller must run it to completion or cancel it first.
    pub fn prepare(&self, items: Vec<ItemId>) -> Fallible<()> {
        if items.is_empty() {
            return fail("batch job: empty item list");
        }
        if self.repo.load()?.is_some() {
            return fail("batch job: an unfinished job exists; resume or cancel it first");
        }
        self.repo.save(&BatchJobState::new(items))
    }

    /// Whether an unfinished job is persisted.
    pub fn has_pending_job(&self) -> Fallible<bool> {
        Ok(self.repo.load()?.is_some())
    }

    /// Run the persisted job to completion or cancellation, resuming at
    /// the saved cursor. State is flushed after every item before the next
    /// one starts.
    pub async fn run<O: ItemOperation>(
        &self,
        operation: &O,
        cancel: &CancelFlag,
    ) -> Fallible<BatchReport> {
        let Some(mut state) = self.repo.load()? else {
            return fail("batch job: nothing to run; prepare a job first");
        };
        log::debug!(
            "batch job: {} of {} items done, resuming",
            state.cursor,
            state.items.len()
        );
        while state.cursor < state.items.len() {
            // A cancel request may arrive through the shared flag or have
            // been persisted into the state by a previous run.
            if cancel.is_cancelled() || state.cancel_requested {
                state.cancel_requested = true;
                log::info!(
                    "batch job cancelled after {} of {} items",
                    state.cursor,
                    state.items.len()
                );
                // Already-applied items are not rolled back.
                self.repo.clear()?;
                return Ok(report(BatchStatus::Cancelled, state));
            }
            let item = state.items[state.cursor].clone();
            match operation.run(&item).await {
                Ok(receipt) => {
                    state.created += receipt.units_produced;
                    state.cost += receipt.cost;
                }
                Err(e) => {
                    log::warn!("batch item {item} failed: {e}");
                    state.errors.push(BatchItemError {
                        item,
                        message: e.to_string(),
                    });
                }
            }
            state.processed += 1;
            state.cursor += 1;
            self.repo.save(&state)?;
        }
        self.repo.clear()?;
        log::info!(
            "batch job completed: {} items, {} created, {} errors",
            state.processed,
            state.created,
            state.errors.len()
        );
        Ok(report(BatchStatus::Completed, state))
    }
}

fn report(status: BatchStatus, state: BatchJobState) -> BatchReport {
    BatchReport {
        status,
        processed: state.processed,
        created: state.created,
        cost: state.cost,
        errors: state.errors,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::store::ItemOperationReceipt;

    /// In-memory repository for tests.
    #[derive(Default)]
    struct MemoryRepo {
        state: Mutex<Option<BatchJobState>>,
    }

    impl JobStateRepository for MemoryRepo {
        fn load(&self) -> Fallible<Option<BatchJobState>> {
            Ok(self.state.lock().unwrap().clone())
        }

        fn save(&self, state: &BatchJobState) -> Fallible<()> {
            *self.state.lock().unwrap() = Some(state.clone());
            Ok(())
        }

        fn clear(&self) -> Fallible<()> {
            *self.state.lock().unwrap() = None;
            Ok(())
        }
    }

    /// Counts invocations; fails for item ids listed in `failing`.
    #[derive(Default)]
    struct CountingOperation {
        calls: AtomicUsize,
        failing: Vec<ItemId>,
    }

    impl ItemOperation for CountingOperation {
        async fn run(&self, item: &ItemId) -> Fallible<ItemOperationReceipt> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.failing.contains(item) {
                return fail(format!("no media for {item}"));
            }
            Ok(ItemOperationReceipt {
                units_produced: 2,
                cost: 0.5,
            })
        }
    }

    fn item_ids(n: usize) -> Vec<ItemId> {
        (0..n).map(|i| ItemId::new(format!("item-{i}"))).collect()
    }

    #[tokio::test]
    async fn test_runs_all_items() {
        let runner = BatchRunner::new(MemoryRepo::default());
        runner.prepare(item_ids(10)).unwrap();
        let op = CountingOperation::default();
        let report = runner.run(&op, &CancelFlag::new()).await.unwrap();
        assert_eq!(report.status, BatchStatus::Completed);
        assert_eq!(report.processed, 10);
        assert_eq!(report.created, 20);
        assert!((report.cost - 5.0).abs() < 1e-9);
        assert!(report.errors.is_empty());
        assert_eq!(op.calls.load(Ordering::Relaxed), 10);
        // Completion clears the persisted state.
        assert!(!runner.has_pending_job().unwrap());
    }

    #[tokio::test]
    async fn test_item_failure_does_not_abort() {
        let runner = BatchRunner::new(MemoryRepo::default());
        runner.prepare(item_ids(5)).unwrap();
        let op = CountingOperation {
            calls: AtomicUsize::new(0),
            failing: vec![ItemId::new("item-2")],
        };
        let report = runner.run(&op, &CancelFlag::new()).await.unwrap();
        assert_eq!(report.status, BatchStatus::Completed);
        assert_eq!(report.processed, 5);
        assert_eq!(report.created, 8);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].item, ItemId::new("item-2"));
    }

    /// A job interrupted after item 4 was flushed resumes at item 5; no
    /// item is double-counted.
    #[tokio::test]
    async fn test_resumes_at_persisted_cursor() {
        let repo = MemoryRepo::default();
        let mut state = BatchJobState::new(item_ids(10));
        state.cursor = 4;
        state.processed = 4;
        state.created = 8;
        state.cost = 2.0;
        repo.save(&state).unwrap();
        let runner = BatchRunner::new(repo);
        let op = CountingOperation::default();
        let report = runner.run(&op, &CancelFlag::new()).await.unwrap();
        assert_eq!(report.status, BatchStatus::Completed);
        assert_eq!(report.processed, 10);
        assert_eq!(report.created, 20);
        // Only the remaining six items were executed.
        assert_eq!(op.calls.load(Ordering::Relaxed), 6);
    }

    #[tokio::test]
    async fn test_cancel_observed_before_first_item() {
        let runner = BatchRunner::new(MemoryRepo::default());
        runner.prepare(item_ids(3)).unwrap();
        let cancel = CancelFlag::new();
        cancel.request_cancel();
        let op = CountingOperation::default();
        let report = runner.run(&op, &cancel).await.unwrap();
        assert_eq!(report.status, BatchStatus::Cancelled);
        assert_eq!(report.processed, 0);
        assert_eq!(op.calls.load(Ordering::Relaxed), 0);
        // Cancellation acknowledges and clears the job.
        assert!(!runner.has_pending_job().unwrap());
    }

    #[tokio::test]
    async fn test_prepare_refuses_second_job() {
        let runner = BatchRunner::new(MemoryRepo::default());
        runner.prepare(item_ids(3)).unwrap();
        assert!(runner.prepare(item_ids(2)).is_err());
    }

    #[tokio::test]
    async fn test_prepare_rejects_empty_list() {
        let runner = BatchRunner::new(MemoryRepo::default());
        assert!(runner.prepare(vec![]).is_err());
    }

    #[tokio::test]
    async fn test_run_without_job_fails() {
        let runner = BatchRunner::new(MemoryRepo::default());
        let op = CountingOperation::default();
        assert!(runner.run(&op, &CancelFlag::new()).await.is_err());
    }
}
