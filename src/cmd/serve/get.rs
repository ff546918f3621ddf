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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;

use super::state::ServerState;
use super::template::Stylesheet;
use super::template::page_template;
use super::view::dashboard_body;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    (StatusCode::OK, Html(render_page(&state)))
}

pub fn render_page(state: &ServerState) -> String {
    let mutable = state.lock();
    let body = dashboard_body(&mutable.coordinator, mutable.notice.as_ref(), true);
    page_template(body, Stylesheet::Linked).into_string()
}
