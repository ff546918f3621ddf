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

use std::collections::BTreeMap;

use crate::path::terminal_segment;
use crate::types::record::ProgressRecord;

/// Attempts needed per exercise, keyed by the exercise's terminal segment.
pub type AttemptCounts = BTreeMap<String, usize>;

/// For every exercise, counts submissions up to and including the first
/// passing one. An exercise that was never passed counts all of its
/// submissions.
///
/// Submissions are ordered by `created_at` with a stable sort, so records
/// sharing a timestamp keep the order they arrived in. Records without a
/// timestamp come first.
pub fn attempts_to_success(records: &[ProgressRecord]) -> AttemptCounts {
    let mut grouped: BTreeMap<&str, Vec<&ProgressRecord>> = BTreeMap::new();
    for record in records {
        let Some(path) = record.path() else {
            continue;
        };
        let segment = terminal_segment(path);
        if segment.is_empty() {
            continue;
        }
        grouped.entry(segment).or_default().push(record);
    }

    grouped
        .into_iter()
        .map(|(segment, mut attempts)| {
            attempts.sort_by_key(|record| record.created_at);
            let count = match attempts.iter().position(|record| record.is_success()) {
                Some(index) => index + 1,
                None => attempts.len(),
            };
            (segment.to_string(), count)
        })
        .collect()
}
