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

//! Turns a set of vocabulary items into the ordered exercise sequence of
//! one lesson. The shape of the output is fixed by the plan; only the
//! orders and alternative choices are random, and all randomness flows
//! through the injected RNG.

use crate::error::Fallible;
use crate::error::fail;
use crate::exercise::ExerciseId;
use crate::exercise::ExerciseKind;
use crate::exercise::ExerciseSpec;
use crate::exercise::ExerciseTask;
use crate::plan::ClozeRange;
use crate::plan::LessonPlan;
use crate::plan::PlanEntry;
use crate::rng::SeededRng;
use crate::types::item::ItemId;
use crate::types::item::VocabItem;

/// Generate the exercise sequence for one lesson.
///
/// Output order is grouped by plan entry: every exercise from entry k
/// precedes every exercise from entry k+1. Within a per-item entry the
/// items are shuffled independently of other entries, so item order
/// differs from one exercise kind to the next.
pub fn generate_lesson(
    items: &[VocabItem],
    plan: &LessonPlan,
    rng: &mut SeededRng,
) -> Fallible<Vec<ExerciseSpec>> {
    if items.is_empty() {
        return fail("cannot generate a lesson from an empty item set");
    }
    let ids: Vec<ItemId> = items.iter().map(|item| item.id.clone()).collect();
    let mut specs: Vec<ExerciseSpec> = Vec::new();
    for entry in plan.entries() {
        if entry.is_whole_set() {
            specs.push(ExerciseSpec {
                id: ExerciseId::new(specs.len() as u32),
                kind: entry.kinds()[0],
                task: ExerciseTask::Summary { items: ids.clone() },
            });
            continue;
        }
        let order: Vec<usize> = rng.shuffled((0..items.len()).collect());
        let mut alternation = Alternation::new(entry);
        for index in order {
            let kind = alternation.deal(rng);
            let item = &items[index];
            specs.push(ExerciseSpec {
                id: ExerciseId::new(specs.len() as u32),
                kind,
                task: build_task(kind, item, &ids, plan.cloze(), rng),
            });
        }
    }
    Ok(specs)
}

fn build_task(
    kind: ExerciseKind,
    item: &VocabItem,
    ids: &[ItemId],
    cloze: ClozeRange,
    rng: &mut SeededRng,
) -> ExerciseTask {
    let id = item.id.clone();
    if kind.is_match() {
        // Each card gets its own pool order, so the correct option does
        // not sit in the same slot across cards of the same kind.
        let pool = rng.shuffled(ids.to_vec());
        return ExerciseTask::Match { item: id, pool };
    }
    match kind {
        ExerciseKind::Discovery => ExerciseTask::Discovery { item: id },
        ExerciseKind::Scaffold => {
            let tiles = rng.shuffled(item.term.chars().collect());
            ExerciseTask::Scaffold { item: id, tiles }
        }
        ExerciseKind::Produce => ExerciseTask::Produce { item: id },
        ExerciseKind::Cloze => {
            let span = (cloze.max_blanks - cloze.min_blanks + 1) as u32;
            let blanks = cloze.min_blanks + rng.below(span) as usize;
            // Never blank more letters than the term has.
            let blanks = blanks.min(item.term.chars().count().max(1));
            ExerciseTask::Cloze { item: id, blanks }
        }
        // Summary is handled by the caller; match kinds above.
        _ => unreachable!("whole-set kind in per-item entry"),
    }
}

/// Deals alternative kinds across the items of one plan entry: a
/// shuffled-without-replacement cycle, so the alternatives come out evenly
/// and, when more than one exists, never twice in a row across a refill
/// boundary.
struct Alternation {
    kinds: Vec<ExerciseKind>,
    bag: Vec<ExerciseKind>,
    last: Option<ExerciseKind>,
}

impl Alternation {
    fn new(entry: &PlanEntry) -> Self {
        Self {
            kinds: entry.kinds().to_vec(),
            bag: Vec::new(),
            last: None,
        }
    }

    fn deal(&mut self, rng: &mut SeededRng) -> ExerciseKind {
        if self.kinds.len() == 1 {
            return self.kinds[0];
        }
        if self.bag.is_empty() {
            self.bag = rng.shuffled(self.kinds.clone());
            // Dealing from the end: make sure the refill does not start
            // with the kind that ended the previous cycle.
            if self.bag.last() == self.last.as_ref() {
                let end = self.bag.len() - 1;
                self.bag.swap(0, end);
            }
        }
        let kind = self.bag.pop().unwrap();
        self.last = Some(kind);
        kind
    }
}
