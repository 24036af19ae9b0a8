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

//! The pure half of lesson completion: folding a session's outcomes into
//! per-item scheduling updates. Deterministic given the same outcome set,
//! so a failed submission can recompute and retry without state loss.

use std::collections::HashMap;

use crate::leitner::SchedulerConfig;
use crate::leitner::SchedulingUpdate;
use crate::leitner::reschedule;
use crate::types::item::ItemId;
use crate::types::item::VocabItem;
use crate::types::outcome::ExerciseOutcome;
use crate::types::outcome::OutcomeClass;
use crate::types::timestamp::Timestamp;

/// Compute the scheduling updates of a finished lesson.
///
/// Non-scored exercises (discovery, summary) are dropped; the rest are
/// grouped by item, preserving their order within the lesson, and each
/// touched item gets one update. Items the lesson never scored are left
/// untouched and do not appear in the result.
pub fn plan_updates(
    items: &[VocabItem],
    outcomes: &[ExerciseOutcome],
    now: Timestamp,
    config: &SchedulerConfig,
) -> Vec<SchedulingUpdate> {
    let mut classes_by_item: HashMap<&ItemId, Vec<OutcomeClass>> = HashMap::new();
    for outcome in outcomes {
        if !outcome.kind.is_scored() {
            continue;
        }
        if let Some(item) = &outcome.item {
            classes_by_item.entry(item).or_default().push(outcome.class);
        }
    }
    // Iterate the input set rather than the map, so the result order is
    // deterministic.
    let mut updates = Vec::new();
    for item in items {
        let Some(classes) = classes_by_item.get(&item.id) else {
            continue;
        };
        if let Some(update) = reschedule(&item.id, item.bin, classes, now, config) {
            updates.push(update);
        }
    }
    updates
}
