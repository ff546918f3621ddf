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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use serde::Serialize;

use crate::chart::ChartView;
use crate::client::Source;
use crate::cmd::serve::template::Stylesheet;
use crate::cmd::serve::template::page_template;
use crate::cmd::serve::view::dashboard_body;
use crate::coordinator::Coordinator;
use crate::error::Fallible;
use crate::error::fail;
use crate::summary::UserSummary;
use crate::types::group::CategoryGroup;
use crate::types::snapshot::Snapshot;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    /// A standalone HTML page.
    Html,
    /// JSON output.
    Json,
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

pub async fn print_report(
    source: &Source,
    group: CategoryGroup,
    format: ReportFormat,
) -> Fallible<()> {
    let snapshot = source.load().await?;
    let report = render_report(snapshot, group, format)?;
    println!("{report}");
    Ok(())
}

/// Renders the first page of both charts for `group`.
pub fn render_report(
    snapshot: Snapshot,
    group: CategoryGroup,
    format: ReportFormat,
) -> Fallible<String> {
    let mut coordinator = Coordinator::new();
    coordinator.load(snapshot);
    coordinator.select_group(group);
    match format {
        ReportFormat::Html => {
            let body = dashboard_body(&coordinator, None, false);
            Ok(page_template(body, Stylesheet::Inline).into_string())
        }
        ReportFormat::Json => {
            let Some(dashboard) = coordinator.dashboard() else {
                return fail("no snapshot loaded.");
            };
            let report = Report {
                user: dashboard.summary,
                group: dashboard.group,
                total_xp: dashboard.total_xp,
                xp_chart: dashboard.bar,
                attempts_chart: dashboard.line,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    user: Option<UserSummary>,
    group: CategoryGroup,
    total_xp: Option<String>,
    xp_chart: &'a ChartView,
    attempts_chart: &'a ChartView,
}
