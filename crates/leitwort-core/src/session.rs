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

//! The lesson session: a single-user state machine stepping through the
//! generated exercises, recording one outcome per exercise occurrence.
//! Session state lives in memory only; lessons are short-lived and do not
//! survive a process restart (unlike batch jobs).

use crate::error::Fallible;
use crate::error::fail;
use crate::exercise::ExerciseSpec;
use crate::generator::generate_lesson;
use crate::plan::LessonPlan;
use crate::rng::SeededRng;
use crate::types::item::VocabItem;
use crate::types::lesson_id::LessonId;
use crate::types::outcome::ExerciseOutcome;
use crate::types::outcome::OutcomeClass;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionPhase {
    /// Stepping through exercises.
    Active,
    /// All exercises answered, or finished early. Ready for submission.
    Finished,
    /// The learner has seen the summary report. A pure UI acknowledgment;
    /// submission is allowed from `Finished` and `Reported` alike.
    Reported,
    /// Cancelled by the learner. All outcomes are discarded.
    Dismissed,
}

pub struct LessonSession {
    id: LessonId,
    learner: String,
    started_at: Timestamp,
    items: Vec<VocabItem>,
    exercises: Vec<ExerciseSpec>,
    /// Latest outcome per exercise, indexed like `exercises`.
    outcomes: Vec<Option<ExerciseOutcome>>,
    cursor: usize,
    /// When the current exercise was put in front of the learner.
    presented_at: Timestamp,
    phase: SessionPhase,
}

impl LessonSession {
    /// Start a lesson: generate the exercise sequence once and present the
    /// first exercise. Fails on an empty item set.
    pub fn start(
        learner: impl Into<String>,
        items: Vec<VocabItem>,
        plan: &LessonPlan,
        seed: u64,
        started_at: Timestamp,
    ) -> Fallible<Self> {
        let mut rng = SeededRng::from_seed(seed);
        let exercises = generate_lesson(&items, plan, &mut rng)?;
        let learner = learner.into();
        let item_ids: Vec<_> = items.iter().map(|item| item.id.clone()).collect();
        let id = LessonId::compute(&learner, started_at, &item_ids);
        let outcomes = vec![None; exercises.len()];
        Ok(Self {
            id,
            learner,
            started_at,
            items,
            exercises,
            outcomes,
            cursor: 0,
            presented_at: started_at,
            phase: SessionPhase::Active,
        })
    }

    pub fn id(&self) -> LessonId {
        self.id
    }

    pub fn learner(&self) -> &str {
        &self.learner
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn items(&self) -> &[VocabItem] {
        &self.items
    }

    /// The exercise currently in front of the learner.
    pub fn current(&self) -> Option<&ExerciseSpec> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        self.exercises.get(self.cursor)
    }

    /// (answered, total).
    pub fn progress(&self) -> (usize, usize) {
        let answered = self.outcomes.iter().filter(|o| o.is_some()).count();
        (answered, self.exercises.len())
    }

    fn require_active(&self) -> Fallible<()> {
        if self.phase != SessionPhase::Active {
            return fail(format!("session is not active: {:?}", self.phase));
        }
        Ok(())
    }

    /// Record the outcome of the current exercise. Re-answering a
    /// revisited exercise replaces the earlier outcome: the scheduler
    /// expects one logical attempt record per exercise occurrence.
    pub fn answer(&mut self, class: OutcomeClass, now: Timestamp) -> Fallible<()> {
        self.require_active()?;
        let spec = &self.exercises[self.cursor];
        self.outcomes[self.cursor] = Some(ExerciseOutcome {
            exercise: spec.id,
            item: spec.item().cloned(),
            kind: spec.kind,
            class,
            started_at: self.presented_at,
            ended_at: now,
        });
        Ok(())
    }

    /// Advance past an answered exercise. Answering the last exercise and
    /// advancing finishes the session.
    pub fn next(&mut self, now: Timestamp) -> Fallible<()> {
        self.require_active()?;
        if self.outcomes[self.cursor].is_none() {
            return fail("cannot advance past an unanswered exercise");
        }
        if self.cursor + 1 == self.exercises.len() {
            self.phase = SessionPhase::Finished;
            return Ok(());
        }
        self.cursor += 1;
        self.presented_at = now;
        Ok(())
    }

    /// Step back to the previous exercise. Its recorded outcome is kept;
    /// only a re-answer replaces it.
    pub fn previous(&mut self, now: Timestamp) -> Fallible<()> {
        self.require_active()?;
        if self.cursor == 0 {
            return fail("already at the first exercise");
        }
        self.cursor -= 1;
        self.presented_at = now;
        Ok(())
    }

    /// Finish the session now. Unanswered exercises contribute no outcome.
    pub fn finish_early(&mut self) -> Fallible<()> {
        self.require_active()?;
        self.phase = SessionPhase::Finished;
        Ok(())
    }

    /// Mark the summary report as seen.
    pub fn acknowledge_report(&mut self) -> Fallible<()> {
        if self.phase != SessionPhase::Finished {
            return fail(format!("session is not finished: {:?}", self.phase));
        }
        self.phase = SessionPhase::Reported;
        Ok(())
    }

    /// Cancel the session and discard everything recorded so far.
    pub fn dismiss(&mut self) -> Fallible<()> {
        self.require_active()?;
        for outcome in self.outcomes.iter_mut() {
            *outcome = None;
        }
        self.phase = SessionPhase::Dismissed;
        Ok(())
    }

    /// The recorded outcomes, one per answered exercise, in exercise
    /// order.
    pub fn outcomes(&self) -> Vec<ExerciseOutcome> {
        self.outcomes.iter().flatten().cloned().collect()
    }
}

/// Holds the single in-flight session of one learner. Starting a new
/// lesson while one is active is refused: the caller must resume it or
/// dismiss it explicitly, so accumulated outcomes are never silently
/// overwritten.
#[derive(Default)]
pub struct SessionSlot {
    session: Option<LessonSession>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self { session: None }
    }

    pub fn begin(
        &mut self,
        learner: impl Into<String>,
        items: Vec<VocabItem>,
        plan: &LessonPlan,
        seed: u64,
        started_at: Timestamp,
    ) -> Fallible<&mut LessonSession> {
        if let Some(session) = &self.session {
            if session.phase() == SessionPhase::Active {
                return fail("a lesson is already in progress: resume or dismiss it first");
            }
        }
        let session = LessonSession::start(learner, items, plan, seed, started_at)?;
        Ok(self.session.insert(session))
    }

    /// The in-flight session, if any.
    pub fn resume(&mut self) -> Option<&mut LessonSession> {
        match &mut self.session {
            Some(session) if session.phase() == SessionPhase::Active => Some(session),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&LessonSession> {
        self.session.as_ref()
    }

    /// Dismiss the in-flight session, if any.
    pub fn dismiss(&mut self) -> Fallible<()> {
        match &mut self.session {
            Some(session) if session.phase() == SessionPhase::Active => session.dismiss(),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::ExerciseKind;
    use crate::plan::ClozeRange;
    use crate::plan::PlanEntry;
    use crate::types::item::ItemId;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn make_items(n: usize) -> Vec<VocabItem> {
        (0..n)
            .map(|i| VocabItem {
                id: ItemId::new(format!("item-{i}")),
                term: format!("term{i}"),
                gloss: format!("gloss{i}"),
                image: None,
                audio: None,
                bin: 0,
                last_success_at: None,
                next_review_at: ts("2024-01-01T00:00:00.000"),
            })
            .collect()
    }

    fn produce_plan() -> LessonPlan {
        LessonPlan::new(
            vec![PlanEntry::single(ExerciseKind::Produce)],
            ClozeRange::default(),
        )
        .unwrap()
    }

    fn start(n: usize) -> LessonSession {
        LessonSession::start(
            "learner",
            make_items(n),
            &produce_plan(),
            42,
            ts("2024-01-01T10:00:00.000"),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_item_set_rejected() {
        let result = LessonSession::start(
            "learner",
            vec![],
            &produce_plan(),
            42,
            ts("2024-01-01T10:00:00.000"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_answer_all_and_finish() {
        let mut session = start(3);
        assert_eq!(session.phase(), SessionPhase::Active);
        for _ in 0..3 {
            assert!(session.current().is_some());
            session
                .answer(OutcomeClass::Succeeded, ts("2024-01-01T10:01:00.000"))
                .unwrap();
            session.next(ts("2024-01-01T10:01:00.000")).unwrap();
        }
        assert_eq!(session.phase(), SessionPhase::Finished);
        assert_eq!(session.outcomes().len(), 3);
        assert!(session.current().is_none());
    }

    #[test]
    fn test_cannot_advance_unanswered() {
        let mut session = start(2);
        assert!(session.next(ts("2024-01-01T10:01:00.000")).is_err());
    }

    #[test]
    fn test_outcome_timestamps_bracket_interaction() {
        let mut session = start(2);
        session
            .answer(OutcomeClass::Succeeded, ts("2024-01-01T10:01:00.000"))
            .unwrap();
        session.next(ts("2024-01-01T10:01:05.000")).unwrap();
        session
            .answer(OutcomeClass::Failed, ts("2024-01-01T10:02:00.000"))
            .unwrap();
        let outcomes = session.outcomes();
        assert_eq!(outcomes[0].started_at, ts("2024-01-01T10:00:00.000"));
        assert_eq!(outcomes[0].ended_at, ts("2024-01-01T10:01:00.000"));
        assert_eq!(outcomes[1].started_at, ts("2024-01-01T10:01:05.000"));
        assert_eq!(outcomes[1].ended_at, ts("2024-01-01T10:02:00.000"));
    }

    #[test]
    fn test_reanswer_keeps_latest_outcome_only() {
        let mut session = start(2);
        session
            .answer(OutcomeClass::Failed, ts("2024-01-01T10:01:00.000"))
            .unwrap();
        session.next(ts("2024-01-01T10:01:00.000")).unwrap();
        session.previous(ts("2024-01-01T10:02:00.000")).unwrap();
        session
            .answer(OutcomeClass::Succeeded, ts("2024-01-01T10:03:00.000"))
            .unwrap();
        let outcomes = session.outcomes();
        // One outcome for the revisited exercise, with the latest class.
        let first: Vec<_> = outcomes
            .iter()
            .filter(|o| o.exercise.index() == 0)
            .collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].class, OutcomeClass::Succeeded);
    }

    #[test]
    fn test_previous_keeps_recorded_outcome() {
        let mut session = start(2);
        session
            .answer(OutcomeClass::Succeeded, ts("2024-01-01T10:01:00.000"))
            .unwrap();
        session.next(ts("2024-01-01T10:01:00.000")).unwrap();
        session.previous(ts("2024-01-01T10:02:00.000")).unwrap();
        assert_eq!(session.outcomes().len(), 1);
    }

    #[test]
    fn test_finish_early_drops_unanswered() {
        let mut session = start(3);
        session
            .answer(OutcomeClass::Succeeded, ts("2024-01-01T10:01:00.000"))
            .unwrap();
        session.finish_early().unwrap();
        assert_eq!(session.phase(), SessionPhase::Finished);
        assert_eq!(session.outcomes().len(), 1);
    }

    #[test]
    fn test_dismiss_discards_outcomes() {
        let mut session = start(2);
        session
            .answer(OutcomeClass::Succeeded, ts("2024-01-01T10:01:00.000"))
            .unwrap();
        session.dismiss().unwrap();
        assert_eq!(session.phase(), SessionPhase::Dismissed);
        assert!(session.outcomes().is_empty());
        assert!(session.answer(OutcomeClass::Failed, ts("2024-01-01T10:02:00.000")).is_err());
    }

    #[test]
    fn test_acknowledge_report() {
        let mut session = start(1);
        session
            .answer(OutcomeClass::Succeeded, ts("2024-01-01T10:01:00.000"))
            .unwrap();
        session.next(ts("2024-01-01T10:01:00.000")).unwrap();
        assert!(session.acknowledge_report().is_ok());
        assert_eq!(session.phase(), SessionPhase::Reported);
        // Only once.
        assert!(session.acknowledge_report().is_err());
    }

    #[test]
    fn test_slot_refuses_second_active_session() {
        let mut slot = SessionSlot::new();
        slot.begin(
            "learner",
            make_items(2),
            &produce_plan(),
            1,
            ts("2024-01-01T10:00:00.000"),
        )
        .unwrap();
        let second = slot.begin(
            "learner",
            make_items(2),
            &produce_plan(),
            2,
            ts("2024-01-01T11:00:00.000"),
        );
        assert!(second.is_err());
        assert!(slot.resume().is_some());
    }

    #[test]
    fn test_slot_allows_new_session_after_dismissal() {
        let mut slot = SessionSlot::new();
        slot.begin(
            "learner",
            make_items(2),
            &produce_plan(),
            1,
            ts("2024-01-01T10:00:00.000"),
        )
        .unwrap();
        slot.dismiss().unwrap();
        assert!(slot.resume().is_none());
        let second = slot.begin(
            "learner",
            make_items(2),
            &produce_plan(),
            2,
            ts("2024-01-01T11:00:00.000"),
        );
        assert!(second.is_ok());
    }
}
