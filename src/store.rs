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

//! The seams to the external collaborators: the lemma store the engine
//! reads items from and writes completions to, and the per-item remote
//! operation applied by background batches. Transports are host concerns;
//! only the semantics are fixed here.

use serde::Deserialize;
use serde::Serialize;

use leitwort_core::ExerciseOutcome;
use leitwort_core::ItemId;
use leitwort_core::LessonId;
use leitwort_core::SchedulingUpdate;
use leitwort_core::VocabItem;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// What a lesson was drawn from: unseen items, due reviews, or both.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LessonKind {
    New,
    Review,
    Mixed,
}

impl LessonKind {
    pub fn as_str(&self) -> &str {
        match self {
            LessonKind::New => "new",
            LessonKind::Review => "review",
            LessonKind::Mixed => "mixed",
        }
    }
}

impl TryFrom<String> for LessonKind {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "new" => Ok(LessonKind::New),
            "review" => Ok(LessonKind::Review),
            "mixed" => Ok(LessonKind::Mixed),
            _ => fail(format!("invalid lesson kind: '{value}'")),
        }
    }
}

/// Filters understood by the lemma store's item listing. The engine passes
/// these through without interpreting them.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct ItemFilter {
    pub topic: Option<String>,
    pub level: Option<u8>,
    pub part_of_speech: Option<String>,
    /// Only items whose image and audio are both present.
    pub with_media_only: bool,
    pub offset: usize,
    pub limit: Option<usize>,
}

/// What the store reports back after accepting a completion batch.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct CompletionReceipt {
    pub created: usize,
    pub updated: usize,
}

/// The single write a lesson produces, submitted as one batch.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LessonCompletion {
    pub learner: String,
    pub lesson: LessonId,
    pub kind: LessonKind,
    pub outcomes: Vec<ExerciseOutcome>,
    pub updates: Vec<SchedulingUpdate>,
}

/// The concept/lemma store. Reads feed the generator; the completion write
/// is the only durable side effect of a lesson. Submission must be safe to
/// retry with an identical payload: exactly-once is enforced client-side
/// by the synchronizer, not assumed of the server.
pub trait LemmaStore {
    fn fetch_candidate_items(
        &self,
        learner: &str,
        learning_language: &str,
        native_language: &str,
        filter: &ItemFilter,
    ) -> impl Future<Output = Fallible<Vec<VocabItem>>>;

    fn submit_lesson_completion(
        &self,
        completion: &LessonCompletion,
    ) -> impl Future<Output = Fallible<CompletionReceipt>>;
}

/// Result of one successful batch item operation.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct ItemOperationReceipt {
    /// How many artifacts the operation created for this item.
    pub units_produced: usize,
    /// What this item cost, in the host's currency unit.
    pub cost: f64,
}

/// A bulk per-item remote operation (e.g. mass media generation), invoked
/// by the background batch runner. A failure is recorded against the item
/// and never aborts the batch.
pub trait ItemOperation {
    fn run(&self, item: &ItemId) -> impl Future<Output = Fallible<ItemOperationReceipt>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_kind_roundtrip() -> Fallible<()> {
        for kind in [LessonKind::New, LessonKind::Review, LessonKind::Mixed] {
            assert_eq!(kind, LessonKind::try_from(kind.as_str().to_string())?);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_lesson_kind() {
        assert!(LessonKind::try_from("revision".to_string()).is_err());
    }

    #[test]
    fn test_default_filter_is_unfiltered() {
        let filter = ItemFilter::default();
        assert_eq!(filter.topic, None);
        assert_eq!(filter.level, None);
        assert_eq!(filter.part_of_speech, None);
        assert!(!filter.with_media_only);
        assert_eq!(filter.offset, 0);
        assert_eq!(filter.limit, None);
    }
}
