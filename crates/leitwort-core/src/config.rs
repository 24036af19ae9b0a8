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

//! Engine configuration, parsed from TOML into raw serde structs and then
//! validated into closed types. Unknown exercise tags, empty plans, and
//! invalid scheduler bounds are all rejected here, before any lesson
//! starts.

use serde::Deserialize;

use crate::error::Fallible;
use crate::exercise::ExerciseKind;
use crate::leitner::SchedulerConfig;
use crate::plan::ClozeRange;
use crate::plan::LessonPlan;
use crate::plan::PlanEntry;

/// Validated engine configuration.
#[derive(Clone, PartialEq, Debug)]
pub struct EngineConfig {
    pub scheduler: SchedulerConfig,
    pub plan: LessonPlan,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            plan: LessonPlan::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML configuration. Omitted sections fall back
    /// to defaults.
    ///
    /// ```toml
    /// [scheduler]
    /// max_bins = 7
    /// interval_start_days = 2
    ///
    /// [[lesson.entry]]
    /// kinds = ["discovery"]
    ///
    /// [[lesson.entry]]
    /// kinds = ["match-term-to-gloss", "match-gloss-to-term"]
    ///
    /// [lesson.cloze]
    /// min_blanks = 1
    /// max_blanks = 3
    /// ```
    pub fn from_toml_str(text: &str) -> Fallible<Self> {
        let raw: RawConfig = toml::from_str(text)?;
        let scheduler = match raw.scheduler {
            Some(raw) => SchedulerConfig {
                max_bins: raw.max_bins.unwrap_or(SchedulerConfig::default().max_bins),
                interval_start_days: raw
                    .interval_start_days
                    .unwrap_or(SchedulerConfig::default().interval_start_days),
            },
            None => SchedulerConfig::default(),
        };
        scheduler.validate()?;
        let plan = match raw.lesson {
            Some(raw) => raw_lesson_plan(raw)?,
            None => LessonPlan::default(),
        };
        Ok(Self { scheduler, plan })
    }
}

fn raw_lesson_plan(raw: RawLesson) -> Fallible<LessonPlan> {
    let mut entries = Vec::new();
    for entry in raw.entry {
        let mut kinds = Vec::new();
        for tag in entry.kinds {
            kinds.push(ExerciseKind::try_from(tag)?);
        }
        entries.push(PlanEntry::new(kinds)?);
    }
    let cloze = match raw.cloze {
        Some(raw) => ClozeRange {
            min_blanks: raw.min_blanks.unwrap_or(ClozeRange::default().min_blanks),
            max_blanks: raw.max_blanks.unwrap_or(ClozeRange::default().max_blanks),
        },
        None => ClozeRange::default(),
    };
    LessonPlan::new(entries, cloze)
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    scheduler: Option<RawScheduler>,
    lesson: Option<RawLesson>,
}

#[derive(Debug, Deserialize)]
struct RawScheduler {
    max_bins: Option<u32>,
    interval_start_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawLesson {
    #[serde(default)]
    entry: Vec<RawEntry>,
    cloze: Option<RawCloze>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    kinds: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawCloze {
    min_blanks: Option<usize>,
    max_blanks: Option<usize>,
}
