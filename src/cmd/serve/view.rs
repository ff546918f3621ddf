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

use maud::Markup;
use maud::html;

use crate::chart::svg::PagerActions;
use crate::chart::svg::chart_area;
use crate::coordinator::Coordinator;
use crate::coordinator::Dashboard;
use crate::summary::USER_NOT_FOUND;
use crate::summary::UserSummary;
use crate::types::group::CategoryGroup;

use super::state::Notice;

const BAR_ACTIONS: PagerActions = PagerActions {
    prev: "BarPrev",
    next: "BarNext",
};

const ATTEMPTS_ACTIONS: PagerActions = PagerActions {
    prev: "AttemptsPrev",
    next: "AttemptsNext",
};

/// The page body. `interactive` controls whether the refresh and logout
/// controls are shown; pages written to a file have nowhere to post to.
pub fn dashboard_body(
    coordinator: &Coordinator,
    notice: Option<&Notice>,
    interactive: bool,
) -> Markup {
    let logged_out = notice == Some(&Notice::LoggedOut);
    html! {
        div.root {
            div.header {
                h1 { "xpboard" }
                @if interactive && !logged_out {
                    form action="/" method="post" {
                        input id="refresh" type="submit" name="action" value="Refresh";
                        input id="logout" type="submit" name="action" value="Logout";
                    }
                }
            }
            @match notice {
                Some(Notice::Error(message)) => {
                    p.error { "Error: " (message) }
                }
                Some(Notice::LoggedOut) => {
                    p.notice { "Logged out. Run `xpboard login` to sign in again." }
                }
                None => {}
            }
            @if let Some(dashboard) = coordinator.dashboard() {
                (cards(&dashboard, interactive && !logged_out))
            }
        }
    }
}

fn cards(dashboard: &Dashboard<'_>, interactive: bool) -> Markup {
    let bar_actions = interactive.then_some(&BAR_ACTIONS);
    let attempts_actions = interactive.then_some(&ATTEMPTS_ACTIONS);
    html! {
        div.cards {
            div.column {
                @match &dashboard.summary {
                    Some(summary) => {
                        (user_card(summary))
                        (audit_card(summary))
                    }
                    None => {
                        div.card {
                            p.error { (USER_NOT_FOUND) }
                        }
                    }
                }
            }
            div.card {
                h3 { "XP Overview" }
                @if interactive {
                    (group_selector(dashboard.group))
                } @else {
                    p.group { (dashboard.group.label()) }
                }
                @if let Some(total) = &dashboard.total_xp {
                    div.total { "Total XP: " (total) }
                }
                div #xp-chart .chart {
                    (chart_area(dashboard.bar, bar_actions))
                }
            }
            div.card {
                h3 { "Attempts to Success" }
                div #attempts-chart .chart {
                    (chart_area(dashboard.line, attempts_actions))
                }
            }
        }
    }
}

fn user_card(summary: &UserSummary) -> Markup {
    html! {
        div.card #user-info {
            h3 { "User Info" }
            ul {
                @if let Some(name) = &summary.full_name {
                    li { span.key { "Full Name:" } span.value { (name) } }
                }
                @if let Some(login) = &summary.login {
                    li { span.key { "Username:" } span.value { (login) } }
                }
                @if let Some(email) = &summary.email {
                    li { span.key { "Email:" } span.value { (email) } }
                }
            }
        }
    }
}

fn audit_card(summary: &UserSummary) -> Markup {
    let done_style = format!("width: {}%;", summary.done_percent);
    let received_style = format!("width: {}%;", summary.received_percent);
    html! {
        div.card #audits {
            h3 { "Audits Ratio" }
            div.row { span { "Done" } span { (summary.done) } }
            div.bar { div.fill.done style=(done_style) {} }
            @if let Some(bonus) = &summary.bonus {
                div.bonus { "+ " (bonus) }
            }
            div.row { span { "Received" } span { (summary.received) } }
            div.bar { div.fill.received style=(received_style) {} }
            div.ratio class=(summary.verdict.class()) {
                p.value { (summary.ratio) }
                p.verdict { (summary.verdict.message()) }
            }
            @if let Some(assigned) = summary.audits_assigned {
                p.assigned { "Audits assigned: " (assigned) }
            }
        }
    }
}

fn group_selector(selected: CategoryGroup) -> Markup {
    html! {
        form.groups action="/" method="post" {
            input type="hidden" name="action" value="Group";
            @for group in CategoryGroup::ALL {
                button.selected[group == selected] type="submit" name="group" value=(group.key()) {
                    (group.label())
                }
            }
        }
    }
}
