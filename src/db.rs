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

//! SQLite-backed durable storage. The only thing the engine persists is
//! the batch job state: a single-row table holding the JSON-encoded state,
//! rewritten after every processed item.

use std::path::Path;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

use crate::batch::BatchJobState;
use crate::batch::JobStateRepository;
use crate::error::Fallible;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS batch_job (
    id INTEGER PRIMARY KEY CHECK (id = 0),
    state TEXT NOT NULL
);
";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}

impl JobStateRepository for Database {
    fn load(&self) -> Fallible<Option<BatchJobState>> {
        let json: Option<String> = self
            .conn
            .query_row("SELECT state FROM batch_job WHERE id = 0", [], |row| {
                row.get(0)
            })
            .optional()?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&self, state: &BatchJobState) -> Fallible<()> {
        let json = serde_json::to_string(state)?;
        self.conn.execute(
            "INSERT INTO batch_job (id, state) VALUES (0, ?1)
             ON CONFLICT (id) DO UPDATE SET state = excluded.state",
            params![json],
        )?;
        Ok(())
    }

    fn clear(&self) -> Fallible<()> {
        self.conn.execute("DELETE FROM batch_job WHERE id = 0", [])?;
        Ok(())
    }
}
