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

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::sleep;

use super::get::get_handler;
use super::post::post_handler;
use super::state::MutableState;
use super::state::Notice;
use super::state::ServerState;
use super::template::STYLE;
use crate::client::Source;
use crate::coordinator::Coordinator;
use crate::error::Fallible;
use crate::error::fail;

pub struct ServeOptions {
    pub port: u16,
    pub open_browser: bool,
}

pub async fn start_server(source: Source, options: ServeOptions) -> Fallible<()> {
    if let Source::File(path) = &source {
        if !path.exists() {
            return fail("snapshot file does not exist.");
        }
    }

    // A failed first load is shown on the page rather than aborting, so the
    // user can retry with the refresh button.
    let mut coordinator = Coordinator::new();
    let notice = match source.load().await {
        Ok(snapshot) => {
            coordinator.load(snapshot);
            None
        }
        Err(e) => {
            log::error!("Failed to load snapshot ({:?}): {e}", e.kind());
            Some(Notice::Error(e.message().to_string()))
        }
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let state = ServerState {
        source: Arc::new(source),
        mutable: Arc::new(Mutex::new(MutableState {
            coordinator,
            notice,
        })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("127.0.0.1:{}", options.port);

    if options.open_browser {
        let url = format!("http://{bind}/");
        let bind = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&bind).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .await?;
    log::debug!("Server stopped.");
    Ok(())
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static str) {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        STYLE,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
