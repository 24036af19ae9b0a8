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

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::item::ItemId;
use crate::types::timestamp::Timestamp;

/// Identity of one lesson instance: the key the completion synchronizer
/// uses for its at-most-once guard. Derived from the learner, the session
/// start time, and the ordered item set, so retrying the same session
/// yields the same id while any new session yields a fresh one.
///
/// Wrapper around the underlying hash function. Needed because blake3 does
/// not implement Ord and PartialOrd.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonId {
    #[serde(skip)]
    inner: blake3::Hash,
}

impl LessonId {
    pub fn compute(learner: &str, started_at: Timestamp, items: &[ItemId]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(learner.as_bytes());
        hasher.update(b"\0");
        hasher.update(started_at.to_string().as_bytes());
        for item in items {
            hasher.update(b"\0");
            hasher.update(item.as_str().as_bytes());
        }
        Self {
            inner: hasher.finalize(),
        }
    }

    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }

    pub fn from_hex(s: &str) -> Fallible<Self> {
        let inner = blake3::Hash::from_hex(s)
            .map_err(|_| ErrorReport::new("invalid lesson id hash"))?;
        Ok(Self { inner })
    }
}

impl PartialOrd for LessonId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LessonId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.as_bytes().cmp(other.inner.as_bytes())
    }
}

impl Display for LessonId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for LessonId {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LessonId::from_hex(&value)
    }
}

impl From<LessonId> for String {
    fn from(id: LessonId) -> String {
        id.to_hex()
    }
}
