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

use serde::Serialize;

use crate::format::format_xp;
use crate::types::user::User;

pub const USER_NOT_FOUND: &str = "User info not found.";

/// How the audit ratio is judged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Excellent,
    Great,
    Fair,
    Poor,
}

impl Verdict {
    fn from_ratio(ratio: Option<f64>) -> Self {
        match ratio {
            None => Verdict::Excellent,
            Some(r) if r >= 2.0 => Verdict::Excellent,
            Some(r) if r >= 1.5 => Verdict::Great,
            Some(r) if r >= 1.0 => Verdict::Fair,
            Some(_) => Verdict::Poor,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent! You nailed it!",
            Verdict::Great => "Great! You’re on the right track!",
            Verdict::Fair => "Hmm… not bad, but you can do better!",
            Verdict::Poor => "Oops! You’ve got room to improve!",
        }
    }

    /// CSS class used to colour the ratio.
    pub fn class(self) -> &'static str {
        match self {
            Verdict::Excellent | Verdict::Great => "good",
            Verdict::Fair => "fair",
            Verdict::Poor => "poor",
        }
    }
}

/// The user and audit cards.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub full_name: Option<String>,
    pub login: Option<String>,
    pub email: Option<String>,
    pub done: String,
    pub received: String,
    pub bonus: Option<String>,
    pub done_percent: f64,
    pub received_percent: f64,
    pub ratio: String,
    pub verdict: Verdict,
    pub audits_assigned: Option<u64>,
}

impl UserSummary {
    pub fn new(user: &User) -> Self {
        let up = user.total_up.unwrap_or(0.0);
        let down = user.total_down.unwrap_or(0.0);
        let bar_max = up.max(down).max(1.0);
        // Without audit totals, fall back to the platform's own figure.
        let ratio = match user.total_down {
            Some(_) if down > 0.0 => Some(up / down),
            Some(_) => None,
            None => user.audit_ratio,
        };

        let full_name = format!(
            "{} {}",
            user.first_name.as_deref().unwrap_or_default(),
            user.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string();

        Self {
            full_name: non_empty(full_name),
            login: user
                .login
                .as_deref()
                .filter(|login| !login.is_empty())
                .map(|login| format!("@{login}")),
            email: user.email.clone().and_then(non_empty),
            done: format_xp(up),
            received: format_xp(down),
            bonus: user
                .total_up_bonus
                .filter(|bonus| *bonus > 0.0)
                .map(format_xp),
            done_percent: up / bar_max * 100.0,
            received_percent: down / bar_max * 100.0,
            ratio: match ratio {
                Some(r) => format!("{}", (r * 10.0).round() / 10.0),
                None => "∞".to_string(),
            },
            verdict: Verdict::from_ratio(ratio),
            audits_assigned: user.audits_assigned,
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
