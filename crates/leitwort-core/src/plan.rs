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

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::exercise::ExerciseKind;

/// One step of a lesson plan: either a whole-set kind (emitted once per
/// lesson) or one or more interchangeable per-item kinds (one exercise per
/// item, alternatives cycled across items).
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<ExerciseKind>", into = "Vec<ExerciseKind>")]
pub struct PlanEntry {
    kinds: Vec<ExerciseKind>,
}

impl PlanEntry {
    pub fn new(kinds: Vec<ExerciseKind>) -> Fallible<Self> {
        if kinds.is_empty() {
            return fail("lesson plan: entry offers no exercise kinds");
        }
        if kinds.iter().any(|k| k.is_whole_set()) {
            if kinds.len() > 1 {
                return fail(
                    "lesson plan: whole-set kinds cannot be offered as alternatives",
                );
            }
        }
        let mut deduped = kinds.clone();
        deduped.sort_by_key(|k| k.as_str().to_string());
        deduped.dedup();
        if deduped.len() != kinds.len() {
            return fail("lesson plan: entry lists the same kind twice");
        }
        Ok(Self { kinds })
    }

    pub fn single(kind: ExerciseKind) -> Self {
        Self { kinds: vec![kind] }
    }

    pub fn kinds(&self) -> &[ExerciseKind] {
        &self.kinds
    }

    pub fn is_whole_set(&self) -> bool {
        self.kinds[0].is_whole_set()
    }
}

impl TryFrom<Vec<ExerciseKind>> for PlanEntry {
    type Error = crate::error::ErrorReport;

    fn try_from(kinds: Vec<ExerciseKind>) -> Result<Self, Self::Error> {
        PlanEntry::new(kinds)
    }
}

impl From<PlanEntry> for Vec<ExerciseKind> {
    fn from(entry: PlanEntry) -> Vec<ExerciseKind> {
        entry.kinds
    }
}

/// Inclusive range for the number of blanked letters in a cloze exercise.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct ClozeRange {
    pub min_blanks: usize,
    pub max_blanks: usize,
}

impl Default for ClozeRange {
    fn default() -> Self {
        Self {
            min_blanks: 1,
            max_blanks: 3,
        }
    }
}

impl ClozeRange {
    pub fn validate(&self) -> Fallible<()> {
        if self.min_blanks < 1 {
            return fail("cloze range: min_blanks must be at least 1");
        }
        if self.max_blanks < self.min_blanks {
            return fail("cloze range: max_blanks must not be below min_blanks");
        }
        Ok(())
    }
}

/// The ordered exercise configuration for one lesson. Validated once at
/// construction; lessons generated from a valid plan cannot hit unknown
/// kinds or malformed entries at runtime.
#[derive(Clone, PartialEq, Debug)]
pub struct LessonPlan {
    entries: Vec<PlanEntry>,
    cloze: ClozeRange,
}

impl LessonPlan {
    pub fn new(entries: Vec<PlanEntry>, cloze: ClozeRange) -> Fallible<Self> {
        if entries.is_empty() {
            return fail("lesson plan: no entries");
        }
        cloze.validate()?;
        Ok(Self { entries, cloze })
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn cloze(&self) -> ClozeRange {
        self.cloze
    }
}

impl Default for LessonPlan {
    /// A typical lesson: discover every item, recap, then drill with
    /// alternating match directions and finish by producing the term.
    fn default() -> Self {
        Self {
            entries: vec![
                PlanEntry::single(ExerciseKind::Discovery),
                PlanEntry::single(ExerciseKind::Summary),
                PlanEntry {
                    kinds: vec![
                        ExerciseKind::MatchTermToGloss,
                        ExerciseKind::MatchGlossToTerm,
                    ],
                },
                PlanEntry::single(ExerciseKind::Produce),
            ],
            cloze: ClozeRange::default(),
        }
    }
}
