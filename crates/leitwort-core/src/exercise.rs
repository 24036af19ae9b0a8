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

use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::item::ItemId;

/// The interaction pattern of a single exercise.
///
/// The six `Match*` variants are interchangeable in lesson plans: a plan
/// entry may offer several of them as alternatives and the generator cycles
/// through the alternatives across items.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ExerciseKind {
    /// First presentation of a new term. Not scored.
    Discovery,
    /// Whole-set recap screen shown once per lesson. Not scored.
    Summary,
    MatchTermToGloss,
    MatchGlossToTerm,
    MatchImageToTerm,
    MatchTermToImage,
    MatchAudioToTerm,
    MatchAudioToImage,
    /// Assemble the term from shuffled letter tiles.
    Scaffold,
    /// Produce the term from the gloss, unaided.
    Produce,
    /// Fill blanked-out letters of the term.
    Cloze,
}

impl ExerciseKind {
    pub fn as_str(&self) -> &str {
        match self {
            ExerciseKind::Discovery => "discovery",
            ExerciseKind::Summary => "summary",
            ExerciseKind::MatchTermToGloss => "match-term-to-gloss",
            ExerciseKind::MatchGlossToTerm => "match-gloss-to-term",
            ExerciseKind::MatchImageToTerm => "match-image-to-term",
            ExerciseKind::MatchTermToImage => "match-term-to-image",
            ExerciseKind::MatchAudioToTerm => "match-audio-to-term",
            ExerciseKind::MatchAudioToImage => "match-audio-to-image",
            ExerciseKind::Scaffold => "scaffold",
            ExerciseKind::Produce => "produce",
            ExerciseKind::Cloze => "cloze",
        }
    }

    /// Whether one exercise of this kind covers the whole item set rather
    /// than a single item.
    pub fn is_whole_set(&self) -> bool {
        matches!(self, ExerciseKind::Summary)
    }

    /// Whether this kind offers a choice among option cards.
    pub fn is_match(&self) -> bool {
        matches!(
            self,
            ExerciseKind::MatchTermToGloss
                | ExerciseKind::MatchGlossToTerm
                | ExerciseKind::MatchImageToTerm
                | ExerciseKind::MatchTermToImage
                | ExerciseKind::MatchAudioToTerm
                | ExerciseKind::MatchAudioToImage
        )
    }

    /// Whether outcomes of this kind feed review scheduling. Presentation
    /// screens (discovery, summary) have no correctness check, so counting
    /// them would promote items the learner never actually recalled.
    pub fn is_scored(&self) -> bool {
        !matches!(self, ExerciseKind::Discovery | ExerciseKind::Summary)
    }
}

impl TryFrom<String> for ExerciseKind {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "discovery" => Ok(ExerciseKind::Discovery),
            "summary" => Ok(ExerciseKind::Summary),
            "match-term-to-gloss" => Ok(ExerciseKind::MatchTermToGloss),
            "match-gloss-to-term" => Ok(ExerciseKind::MatchGlossToTerm),
            "match-image-to-term" => Ok(ExerciseKind::MatchImageToTerm),
            "match-term-to-image" => Ok(ExerciseKind::MatchTermToImage),
            "match-audio-to-term" => Ok(ExerciseKind::MatchAudioToTerm),
            "match-audio-to-image" => Ok(ExerciseKind::MatchAudioToImage),
            "scaffold" => Ok(ExerciseKind::Scaffold),
            "produce" => Ok(ExerciseKind::Produce),
            "cloze" => Ok(ExerciseKind::Cloze),
            _ => fail(format!("unknown exercise kind: '{value}'")),
        }
    }
}

/// Identifies one exercise occurrence within a lesson. Assigned
/// sequentially by the generator in presentation order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(u32);

impl ExerciseId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// The kind-specific payload of an exercise. Each variant carries only the
/// fields its kind needs, so a renderer can never hit a missing field at
/// runtime.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum ExerciseTask {
    Discovery {
        item: ItemId,
    },
    Summary {
        items: Vec<ItemId>,
    },
    /// A match card: the learner picks `item` out of `pool`. The pool is
    /// the full lesson set in an order shuffled independently per card.
    Match {
        item: ItemId,
        pool: Vec<ItemId>,
    },
    /// Letter tiles of the term, shuffled.
    Scaffold {
        item: ItemId,
        tiles: Vec<char>,
    },
    Produce {
        item: ItemId,
    },
    Cloze {
        item: ItemId,
        blanks: usize,
    },
}

/// One exercise in a generated lesson. Immutable once generated; never
/// persisted beyond the session that consumes it.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ExerciseSpec {
    pub id: ExerciseId,
    pub kind: ExerciseKind,
    pub task: ExerciseTask,
}

impl ExerciseSpec {
    /// The single item this exercise practices, or `None` for whole-set
    /// exercises.
    pub fn item(&self) -> Option<&ItemId> {
        match &self.task {
            ExerciseTask::Discovery { item } => Some(item),
            ExerciseTask::Summary { .. } => None,
            ExerciseTask::Match { item, .. } => Some(item),
            ExerciseTask::Scaffold { item, .. } => Some(item),
            ExerciseTask::Produce { item } => Some(item),
            ExerciseTask::Cloze { item, .. } => Some(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    const ALL_KINDS: [ExerciseKind; 11] = [
        ExerciseKind::Discovery,
        ExerciseKind::Summary,
        ExerciseKind::MatchTermToGloss,
        ExerciseKind::MatchGlossToTerm,
        ExerciseKind::MatchImageToTerm,
        ExerciseKind::MatchTermToImage,
        ExerciseKind::MatchAudioToTerm,
        ExerciseKind::MatchAudioToImage,
        ExerciseKind::Scaffold,
        ExerciseKind::Produce,
        ExerciseKind::Cloze,
    ];

    #[test]
    fn test_kind_string_roundtrip() -> Fallible<()> {
        for kind in ALL_KINDS {
            assert_eq!(kind, ExerciseKind::try_from(kind.as_str().to_string())?);
        }
        Ok(())
    }

    #[test]
    fn test_unknown_kind_string() {
        for s in ["", "match", "summary-screen"] {
            assert!(ExerciseKind::try_from(s.to_string()).is_err());
        }
    }

    #[test]
    fn test_only_summary_is_whole_set() {
        for kind in ALL_KINDS {
            assert_eq!(kind.is_whole_set(), kind == ExerciseKind::Summary);
        }
    }

    #[test]
    fn test_presentation_kinds_are_not_scored() {
        assert!(!ExerciseKind::Discovery.is_scored());
        assert!(!ExerciseKind::Summary.is_scored());
        assert!(ExerciseKind::Produce.is_scored());
        assert!(ExerciseKind::MatchAudioToImage.is_scored());
    }

    #[test]
    fn test_spec_item() {
        let spec = ExerciseSpec {
            id: ExerciseId::new(0),
            kind: ExerciseKind::Produce,
            task: ExerciseTask::Produce {
                item: ItemId::new("a"),
            },
        };
        assert_eq!(spec.item(), Some(&ItemId::new("a")));
        let spec = ExerciseSpec {
            id: ExerciseId::new(1),
            kind: ExerciseKind::Summary,
            task: ExerciseTask::Summary {
                items: vec![ItemId::new("a")],
            },
        };
        assert_eq!(spec.item(), None);
    }
}
