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

//! leitwort-core: the pure half of the leitwort lesson engine.
//!
//! This library provides deterministic, I/O-free types and algorithms for:
//! - Leitner-box review scheduling
//! - Lesson generation (typed exercises from a vocabulary item set)
//! - The lesson session state machine
//! - Folding session outcomes into scheduling updates
//!
//! Nothing here reads the clock ("now" is injected; `Timestamp::now` is
//! gated behind the `clock` feature) or touches the network or disk: those
//! concerns live in the `leitwort` crate.

pub mod completion;
pub mod config;
pub mod error;
pub mod exercise;
pub mod generator;
pub mod leitner;
pub mod plan;
pub mod rng;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use completion::plan_updates;
pub use config::EngineConfig;
pub use error::{ErrorReport, Fallible, fail};
pub use exercise::{ExerciseId, ExerciseKind, ExerciseSpec, ExerciseTask};
pub use generator::generate_lesson;
pub use leitner::{SchedulerConfig, SchedulingUpdate, interval_days, reschedule};
pub use plan::{ClozeRange, LessonPlan, PlanEntry};
pub use rng::SeededRng;
pub use session::{LessonSession, SessionPhase, SessionSlot};
pub use types::item::{Bin, ItemId, VocabItem};
pub use types::lesson_id::LessonId;
pub use types::outcome::{ExerciseOutcome, OutcomeClass};
pub use types::timestamp::Timestamp;
