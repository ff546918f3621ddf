// Copyright 2025 Fernando Borretti
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

use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::record::ProgressRecord;
use crate::types::record::XpRecord;
use crate::types::user::User;

/// Everything the dashboard knows about one user: the `data` object of a
/// single GraphQL response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "user_by_pk", default)]
    pub user: Option<User>,
    #[serde(rename = "xp_view", default)]
    pub xp_records: Vec<XpRecord>,
    #[serde(rename = "progress", default)]
    pub progress_records: Vec<ProgressRecord>,
}

#[derive(Deserialize)]
struct Envelope {
    data: Option<Snapshot>,
}

impl Snapshot {
    /// Reads a saved response. Both the full `{"data": ...}` envelope and
    /// the bare `data` object are accepted.
    pub fn from_file(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return fail(format!("snapshot file {} does not exist.", path.display()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Fallible<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let snapshot = if value.get("data").is_some() {
            let envelope: Envelope = serde_json::from_value(value)?;
            envelope.data.unwrap_or_default()
        } else {
            serde_json::from_value(value)?
        };
        Ok(snapshot)
    }
}
