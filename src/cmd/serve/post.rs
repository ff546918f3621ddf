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

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use serde::Deserialize;

use super::get::render_page;
use super::state::Notice;
use super::state::ServerState;
use crate::types::group::CategoryGroup;

#[derive(Debug, Deserialize)]
enum Action {
    Group,
    BarPrev,
    BarNext,
    AttemptsPrev,
    AttemptsNext,
    Refresh,
    Logout,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    group: Option<CategoryGroup>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Response {
    match form.action {
        Action::Refresh => {
            refresh(&state).await;
        }
        Action::Logout => {
            return logout(&state);
        }
        Action::Group => match form.group {
            Some(group) => {
                state.lock().coordinator.select_group(group);
            }
            None => {
                log::error!("Group action without a group.");
            }
        },
        Action::BarPrev => {
            state.lock().coordinator.bar_prev();
        }
        Action::BarNext => {
            state.lock().coordinator.bar_next();
        }
        Action::AttemptsPrev => {
            state.lock().coordinator.attempts_prev();
        }
        Action::AttemptsNext => {
            state.lock().coordinator.attempts_next();
        }
    }
    Redirect::to("/").into_response()
}

/// Drops the snapshot and stops the server. The final page is returned
/// directly, since there will be no server left to redirect to.
fn logout(state: &ServerState) -> Response {
    log::debug!("Logging out.");
    {
        let mut mutable = state.lock();
        mutable.coordinator.clear();
        mutable.notice = Some(Notice::LoggedOut);
    }
    let page = render_page(state);
    state.shutdown();
    (StatusCode::OK, Html(page)).into_response()
}

/// Fetches a fresh snapshot. The lock is only taken once the fetch is done,
/// so the page stays responsive while it runs.
async fn refresh(state: &ServerState) {
    let result = state.source.load().await;
    let mut mutable = state.lock();
    match result {
        Ok(snapshot) => {
            mutable.coordinator.load(snapshot);
            mutable.notice = None;
        }
        Err(e) => {
            log::error!("Failed to load snapshot ({:?}): {e}", e.kind());
            mutable.notice = Some(Notice::Error(e.message().to_string()));
        }
    }
}
