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

//! The Leitner scheduler: a pure mapping from the outcomes an item
//! accumulated during one lesson to its new bin and next review time.
//! "Now" is always injected, so every function here is deterministic.

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::item::Bin;
use crate::types::item::ItemId;
use crate::types::outcome::OutcomeClass;
use crate::types::timestamp::Timestamp;

/// Review interval after a failed or hint-assisted lesson, in days.
pub const RELAPSE_INTERVAL_DAYS: i64 = 1;

/// Upper limit on `max_bins`. The interval sequence grows like the
/// Fibonacci numbers, so bins much beyond this would overflow the day
/// arithmetic long before any learner could reach them.
pub const MAX_BINS_LIMIT: Bin = 64;

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Highest reachable bin. Bins run from 0 to this value inclusive.
    pub max_bins: Bin,
    /// Seed of the interval sequence, in days.
    pub interval_start_days: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_bins: 7,
            interval_start_days: 1,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Fallible<()> {
        if self.max_bins < 1 || self.max_bins > MAX_BINS_LIMIT {
            return fail(format!(
                "scheduler config: max_bins must be between 1 and {MAX_BINS_LIMIT}"
            ));
        }
        if self.interval_start_days < 1 {
            return fail("scheduler config: interval_start_days must be at least 1");
        }
        Ok(())
    }
}

/// The review interval, in days, granted on promotion into `bin`.
///
/// Fibonacci-like: i(0) = s, i(1) = s + 1, i(n) = i(n-1) + i(n-2), where s
/// is the configured start interval. Strictly increasing in the bin for
/// any s >= 1.
pub fn interval_days(bin: Bin, config: &SchedulerConfig) -> i64 {
    let s = config.interval_start_days;
    let mut prev = s;
    let mut curr = s + 1;
    match bin {
        0 => prev,
        1 => curr,
        _ => {
            for _ in 2..=bin {
                // Saturate rather than overflow for bins past the
                // validated limit.
                let next = prev.saturating_add(curr);
                prev = curr;
                curr = next;
            }
            curr
        }
    }
}

/// The single per-item result of one lesson: how an item's outcomes fold
/// into one logical result for scheduling purposes. A success anywhere in
/// the lesson outweighs earlier hints and failures; hints outweigh
/// failures.
pub fn overall_class(classes: &[OutcomeClass]) -> Option<OutcomeClass> {
    if classes.is_empty() {
        return None;
    }
    if classes.contains(&OutcomeClass::Succeeded) {
        Some(OutcomeClass::Succeeded)
    } else if classes.contains(&OutcomeClass::NeededHints) {
        Some(OutcomeClass::NeededHints)
    } else {
        Some(OutcomeClass::Failed)
    }
}

/// The durable side effect of a lesson for one item: its new bin and next
/// review time, to be written back to the lemma store.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SchedulingUpdate {
    pub item: ItemId,
    pub bin: Bin,
    pub next_review_at: Timestamp,
}

/// Compute the scheduling update for one item given the outcomes it
/// accumulated this lesson. Returns `None` when the item was not practiced
/// at all, in which case its schedule is left untouched.
pub fn reschedule(
    item: &ItemId,
    bin: Bin,
    classes: &[OutcomeClass],
    now: Timestamp,
    config: &SchedulerConfig,
) -> Option<SchedulingUpdate> {
    let overall = overall_class(classes)?;
    let (bin, next_review_at) = match overall {
        OutcomeClass::Succeeded => {
            let bin = Bin::min(bin + 1, config.max_bins);
            (bin, now.plus_days(interval_days(bin, config)))
        }
        OutcomeClass::NeededHints => (bin, now.plus_days(RELAPSE_INTERVAL_DAYS)),
        OutcomeClass::Failed => (
            bin.saturating_sub(1),
            now.plus_days(RELAPSE_INTERVAL_DAYS),
        ),
    };
    Some(SchedulingUpdate {
        item: item.clone(),
        bin,
        next_review_at,
    })
}
