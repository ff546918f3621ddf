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

use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::jwt;
use crate::types::snapshot::Snapshot;

pub const NO_TOKEN: &str = "No login data found. Please login first.";

const QUERY: &str = r#"
query ($userId: Int!) {
  user_by_pk(id: $userId) {
    login
    email
    firstName
    lastName
    auditRatio
    totalUp
    totalDown
    totalUpBonus
    auditsAssigned
  }
  xp_view(where: {userId: {_eq: $userId}}) {
    amount
    path
  }
  progress(where: {userId: {_eq: $userId}}, order_by: {createdAt: asc}) {
    path
    createdAt
    grade
  }
}
"#;

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<Snapshot>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// HTTP client for the learning platform.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    graphql_endpoint: String,
    signin_endpoint: String,
}

impl Client {
    pub fn new(config: &Config) -> Fallible<Self> {
        Self::with_timeout(config, config.timeout())
    }

    pub fn with_timeout(config: &Config, timeout: Duration) -> Fallible<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            graphql_endpoint: config.graphql_endpoint.clone(),
            signin_endpoint: config.signin_endpoint.clone(),
        })
    }

    /// Exchanges credentials for a token.
    pub async fn sign_in(&self, username: &str, password: &str) -> Fallible<String> {
        log::debug!("Signing in as {username}.");
        let response = self
            .http
            .post(&self.signin_endpoint)
            .basic_auth(username, Some(password))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ErrorReport::auth(format!("sign-in failed ({status})")));
        }
        let token = body.trim().trim_matches('"').to_string();
        if !jwt::is_well_formed(&token) {
            return Err(ErrorReport::auth("Invalid or malformed JWT token"));
        }
        Ok(token)
    }

    /// Runs the dashboard query for one user.
    pub async fn fetch_snapshot(&self, token: &str, user_id: u64) -> Fallible<Snapshot> {
        let start = Instant::now();
        let response = self
            .http
            .post(&self.graphql_endpoint)
            .bearer_auth(token)
            .json(&json!({ "query": QUERY, "variables": { "userId": user_id } }))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        let parsed: GraphQlResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(ErrorReport::fetch(format!("request failed ({status})")));
            }
            Err(e) => return Err(e.into()),
        };
        if !parsed.errors.is_empty() {
            let messages: Vec<String> = parsed.errors.into_iter().map(|e| e.message).collect();
            return Err(ErrorReport::fetch(messages.join("; ")));
        }
        if !status.is_success() {
            return Err(ErrorReport::fetch(format!("request failed ({status})")));
        }
        let snapshot = parsed
            .data
            .ok_or_else(|| ErrorReport::data("response contains no data"))?;
        let duration = start.elapsed().as_millis();
        log::debug!("Snapshot fetched in {duration}ms.");
        Ok(snapshot)
    }
}

/// Where snapshots come from.
pub enum Source {
    /// A saved GraphQL response on disk.
    File(PathBuf),
    /// The platform, on behalf of the token's user.
    Remote {
        client: Client,
        token: String,
        user_id: u64,
    },
}

impl Source {
    pub fn remote(client: Client, token: String) -> Fallible<Self> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(ErrorReport::auth(NO_TOKEN));
        }
        let user_id = jwt::user_id(&token)?;
        Ok(Source::Remote {
            client,
            token,
            user_id,
        })
    }

    pub async fn load(&self) -> Fallible<Snapshot> {
        match self {
            Source::File(path) => Snapshot::from_file(path),
            Source::Remote {
                client,
                token,
                user_id,
            } => client.fetch_snapshot(token, *user_id).await,
        }
    }
}
