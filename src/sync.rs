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

//! Turns a finished session into exactly one store submission. The
//! submission payload is recomputed from the session's outcomes on every
//! attempt (the planner is pure), so a rejected submission can simply be
//! retried; the at-most-once guard is only marked after the store accepts.

use std::collections::HashSet;

use leitwort_core::LessonId;
use leitwort_core::LessonSession;
use leitwort_core::SchedulerConfig;
use leitwort_core::SessionPhase;
use leitwort_core::Timestamp;
use leitwort_core::plan_updates;

use crate::error::Fallible;
use crate::error::fail;
use crate::store::CompletionReceipt;
use crate::store::LemmaStore;
use crate::store::LessonCompletion;
use crate::store::LessonKind;

pub struct CompletionSynchronizer {
    config: SchedulerConfig,
    submitted: HashSet<LessonId>,
}

impl CompletionSynchronizer {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            submitted: HashSet::new(),
        }
    }

    /// Whether this session's completion has already been accepted.
    pub fn is_submitted(&self, lesson: LessonId) -> bool {
        self.submitted.contains(&lesson)
    }

    /// Submit a finished session's outcomes and scheduling updates as one
    /// batch. A second call for the same session is a no-op returning
    /// `None`: that indicates a caller bug, not a user-facing failure. An
    /// error from the store leaves the guard unset, so the call can be
    /// retried as-is.
    pub async fn submit<S: LemmaStore>(
        &mut self,
        store: &S,
        session: &LessonSession,
        kind: LessonKind,
        now: Timestamp,
    ) -> Fallible<Option<CompletionReceipt>> {
        match session.phase() {
            SessionPhase::Finished | SessionPhase::Reported => {}
            phase => {
                return fail(format!(
                    "cannot submit a session in phase {phase:?}; finish it first"
                ));
            }
        }
        let lesson = session.id();
        if self.submitted.contains(&lesson) {
            log::debug!("lesson {lesson} already submitted, ignoring");
            return Ok(None);
        }
        let outcomes = session.outcomes();
        let updates = plan_updates(session.items(), &outcomes, now, &self.config);
        let completion = LessonCompletion {
            learner: session.learner().to_string(),
            lesson,
            kind,
            outcomes,
            updates,
        };
        let receipt = store.submit_lesson_completion(&completion).await?;
        self.submitted.insert(lesson);
        log::info!(
            "lesson {lesson} submitted: {} outcomes, {} updates",
            completion.outcomes.len(),
            completion.updates.len()
        );
        Ok(Some(receipt))
    }
}
