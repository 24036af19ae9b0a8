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
use crate::exercise::ExerciseId;
use crate::exercise::ExerciseKind;
use crate::types::item::ItemId;
use crate::types::timestamp::Timestamp;

/// How one exercise attempt went. Each exercise kind applies its own
/// correctness check; whatever that check is, it collapses to one of these
/// three classes before the scheduler sees it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum OutcomeClass {
    Succeeded,
    NeededHints,
    Failed,
}

impl OutcomeClass {
    pub fn as_str(&self) -> &str {
        match self {
            OutcomeClass::Succeeded => "succeeded",
            OutcomeClass::NeededHints => "needed-hints",
            OutcomeClass::Failed => "failed",
        }
    }
}

impl TryFrom<String> for OutcomeClass {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "succeeded" => Ok(OutcomeClass::Succeeded),
            "needed-hints" => Ok(OutcomeClass::NeededHints),
            "failed" => Ok(OutcomeClass::Failed),
            _ => fail(format!("invalid outcome class: '{value}'")),
        }
    }
}

/// The result of one exercise attempt. The session keeps at most one of
/// these per exercise id; re-answering replaces the earlier record.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ExerciseOutcome {
    pub exercise: ExerciseId,
    /// `None` for whole-set exercises, which reference no single item.
    pub item: Option<ItemId>,
    pub kind: ExerciseKind,
    pub class: OutcomeClass,
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_class_string_roundtrip() -> Fallible<()> {
        let classes = [
            OutcomeClass::Succeeded,
            OutcomeClass::NeededHints,
            OutcomeClass::Failed,
        ];
        for class in classes {
            assert_eq!(class, OutcomeClass::try_from(class.as_str().to_string())?);
        }
        Ok(())
    }

    #[test]
    fn test_class_serialization_format() -> Fallible<()> {
        let classes = [
            OutcomeClass::Succeeded,
            OutcomeClass::NeededHints,
            OutcomeClass::Failed,
        ];
        let expected = ["Succeeded", "NeededHints", "Failed"];
        for (class, expected) in zip(classes, expected) {
            assert_eq!(serde_json::to_string(&class)?, format!("\"{expected}\""));
        }
        Ok(())
    }

    #[test]
    fn test_invalid_class_string() {
        for s in ["", "success", "hinted"] {
            assert!(OutcomeClass::try_from(s.to_string()).is_err());
        }
    }
}
