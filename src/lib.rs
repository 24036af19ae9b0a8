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

//! leitwort: the lesson engine of a vocabulary trainer.
//!
//! The pure scheduling/generation/session core lives in `leitwort-core`
//! and is re-exported here. This crate adds the I/O half: the traits for
//! the external lemma store and batch item operations, the completion
//! synchronizer (exactly-once submission of a finished lesson), the
//! resumable background batch runner, and its SQLite-backed job-state
//! repository.

pub mod batch;
pub mod db;
pub mod error;
pub mod store;
pub mod sync;

// Re-exports for convenience
pub use batch::{BatchJobState, BatchReport, BatchRunner, BatchStatus, CancelFlag, JobStateRepository};
pub use db::Database;
pub use leitwort_core::config::EngineConfig;
pub use leitwort_core::exercise::{ExerciseId, ExerciseKind, ExerciseSpec, ExerciseTask};
pub use leitwort_core::leitner::{SchedulerConfig, SchedulingUpdate};
pub use leitwort_core::plan::{ClozeRange, LessonPlan, PlanEntry};
pub use leitwort_core::session::{LessonSession, SessionPhase, SessionSlot};
pub use leitwort_core::types::item::{Bin, ItemId, VocabItem};
pub use leitwort_core::types::lesson_id::LessonId;
pub use leitwort_core::types::outcome::{ExerciseOutcome, OutcomeClass};
pub use leitwort_core::types::timestamp::Timestamp;
pub use store::{CompletionReceipt, ItemFilter, ItemOperation, ItemOperationReceipt, LemmaStore, LessonCompletion, LessonKind};
pub use sync::CompletionSynchronizer;
