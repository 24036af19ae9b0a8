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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::timestamp::Timestamp;

/// A Leitner bin index. Always in `[0, max_bins]`.
pub type Bin = u32;

/// Stable identifier of a vocabulary item, assigned by the lemma store.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable snapshot of one learner-scoped vocabulary entry, as served
/// by the lemma store. The engine only ever reads these; the store owns
/// them, and scheduling changes flow back as `SchedulingUpdate`s.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct VocabItem {
    pub id: ItemId,
    /// The term in the language being learned.
    pub term: String,
    /// The gloss in the learner's native language.
    pub gloss: String,
    pub image: Option<String>,
    pub audio: Option<String>,
    /// Current Leitner bin.
    pub bin: Bin,
    pub last_success_at: Option<Timestamp>,
    pub next_review_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_display() {
        assert_eq!(ItemId::new("lemma-42").to_string(), "lemma-42");
    }

    #[test]
    fn test_item_id_serde_is_transparent() {
        let id = ItemId::new("lemma-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"lemma-42\"");
        let back: ItemId = serde_json::from_str("\"lemma-42\"").unwrap();
        assert_eq!(back, id);
    }
}
