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

use crate::attempts::AttemptCounts;
use crate::attempts::attempts_to_success;
use crate::chart::ChartView;
use crate::chart::bar;
use crate::chart::line;
use crate::chart::line::NO_PROGRESS_DATA;
use crate::chart::page_count;
use crate::format::format_xp;
use crate::summary::UserSummary;
use crate::types::group::CategoryGroup;
use crate::types::snapshot::Snapshot;
use crate::xp::XpBuckets;
use crate::xp::aggregate_by_path;
use crate::xp::filter_by_group;
use crate::xp::total;

/// Owns the cached snapshot and everything derived from it. All state
/// changes go through its methods; each one re-renders only what it
/// affects.
#[derive(Default)]
pub struct Coordinator {
    loaded: Option<Loaded>,
}

struct Loaded {
    snapshot: Snapshot,
    group: CategoryGroup,
    bar_page: usize,
    attempts_page: usize,
    /// `None` when the amounts could not be aggregated.
    buckets: Option<XpBuckets>,
    attempts: AttemptCounts,
    bar: ChartView,
    line: ChartView,
}

/// A borrowed view of everything the page shows.
pub struct Dashboard<'a> {
    pub summary: Option<UserSummary>,
    pub group: CategoryGroup,
    pub total_xp: Option<String>,
    pub bar: &'a ChartView,
    pub line: &'a ChartView,
}

impl Coordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot wholesale. The group goes back to the default
    /// and both charts to their first page.
    pub fn load(&mut self, snapshot: Snapshot) {
        log::debug!(
            "Loading snapshot: {} XP records, {} progress records.",
            snapshot.xp_records.len(),
            snapshot.progress_records.len()
        );
        let attempts = attempts_to_success(&snapshot.progress_records);
        let mut loaded = Loaded {
            snapshot,
            group: CategoryGroup::default(),
            bar_page: 0,
            attempts_page: 0,
            buckets: None,
            attempts,
            bar: ChartView::Placeholder(bar::NO_XP_DATA.to_string()),
            line: ChartView::Placeholder(NO_PROGRESS_DATA.to_string()),
        };
        loaded.aggregate();
        loaded.render_bar();
        loaded.render_line();
        self.loaded = Some(loaded);
    }

    /// Drops the snapshot.
    pub fn clear(&mut self) {
        log::debug!("Clearing snapshot.");
        self.loaded = None;
    }

    /// Switches the XP filter. The attempts chart does not depend on it and
    /// is left alone.
    pub fn select_group(&mut self, group: CategoryGroup) {
        if let Some(loaded) = &mut self.loaded {
            log::debug!("Selecting group {group}.");
            loaded.group = group;
            loaded.bar_page = 0;
            loaded.aggregate();
            loaded.render_bar();
        }
    }

    pub fn bar_prev(&mut self) {
        if let Some(loaded) = &mut self.loaded {
            if loaded.bar_page > 0 {
                loaded.bar_page -= 1;
                loaded.render_bar();
            }
        }
    }

    pub fn bar_next(&mut self) {
        if let Some(loaded) = &mut self.loaded {
            let pages = loaded.buckets.as_ref().map_or(1, |b| page_count(b.len()));
            if loaded.bar_page + 1 < pages {
                loaded.bar_page += 1;
                loaded.render_bar();
            }
        }
    }

    pub fn attempts_prev(&mut self) {
        if let Some(loaded) = &mut self.loaded {
            if loaded.attempts_page > 0 {
                loaded.attempts_page -= 1;
                loaded.render_line();
            }
        }
    }

    pub fn attempts_next(&mut self) {
        if let Some(loaded) = &mut self.loaded {
            if loaded.attempts_page + 1 < page_count(loaded.attempts.len()) {
                loaded.attempts_page += 1;
                loaded.render_line();
            }
        }
    }

    pub fn dashboard(&self) -> Option<Dashboard<'_>> {
        let loaded = self.loaded.as_ref()?;
        Some(Dashboard {
            summary: loaded.snapshot.user.as_ref().map(UserSummary::new),
            group: loaded.group,
            total_xp: loaded.buckets.as_ref().map(|b| format_xp(total(b))),
            bar: &loaded.bar,
            line: &loaded.line,
        })
    }
}

impl Loaded {
    fn aggregate(&mut self) {
        let records = filter_by_group(&self.snapshot.xp_records, self.group);
        match aggregate_by_path(&records) {
            Ok(buckets) => {
                self.buckets = Some(buckets);
            }
            Err(e) => {
                log::error!("Failed to aggregate XP for {}: {e}", self.group);
                self.buckets = None;
                self.bar = ChartView::Failed(e.message().to_string());
            }
        }
    }

    fn render_bar(&mut self) {
        if let Some(buckets) = &self.buckets {
            self.bar = bar::render(buckets, self.bar_page);
        }
    }

    fn render_line(&mut self) {
        self.line = if self.snapshot.progress_records.is_empty() {
            ChartView::Placeholder(NO_PROGRESS_DATA.to_string())
        } else {
            line::render(&self.attempts, self.attempts_page)
        };
    }
}

#[cfg(test)]
impl Coordinator {
    fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    fn group(&self) -> Option<CategoryGroup> {
        self.loaded.as_ref().map(|loaded| loaded.group)
    }

    fn pages(&self) -> Option<(usize, usize)> {
        self.loaded
            .as_ref()
            .map(|loaded| (loaded.bar_page, loaded.attempts_page))
    }
}
