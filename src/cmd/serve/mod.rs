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

mod get;
mod post;
pub mod server;
pub mod state;
pub mod template;
pub mod view;

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::path::PathBuf;
    use std::time::Duration;

    use reqwest::StatusCode;
    use tempfile::tempdir;
    use tokio::fs::remove_file;
    use tokio::fs::write;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::task::JoinHandle;
    use tokio::time::sleep;
    use tokio::time::timeout;

    use crate::client::Source;
    use crate::cmd::serve::server::ServeOptions;
    use crate::cmd::serve::server::start_server;
    use crate::error::ErrorReport;
    use crate::error::Fallible;

    const SNAPSHOT: &str = r#"{"data": {
        "user_by_pk": {"login": "jdoe", "firstName": "Jane", "lastName": "Doe", "totalUp": 3000, "totalDown": 1000},
        "xp_view": [
            {"amount": 1500, "path": "/bahrain/bh-module/exercise-1"},
            {"amount": 500000, "path": "/bahrain/bh-module/exercise-2"},
            {"amount": 700, "path": "/bahrain/bh-module/piscine-js/exercise-3"}
        ],
        "progress": [
            {"path": "/bahrain/bh-module/ex1", "createdAt": "2024-01-01T00:00:00Z", "grade": 0},
            {"path": "/bahrain/bh-module/ex1", "createdAt": "2024-01-02T00:00:00Z", "grade": 0},
            {"path": "/bahrain/bh-module/ex1", "createdAt": "2024-01-03T00:00:00Z", "grade": 1}
        ]
    }}"#;

    async fn launch(snapshot: &Path) -> Fallible<(String, JoinHandle<Fallible<()>>)> {
        let port = portpicker::pick_unused_port().ok_or_else(|| ErrorReport::new("no port"))?;
        let source = Source::File(snapshot.to_path_buf());
        let options = ServeOptions {
            port,
            open_browser: false,
        };
        let handle = spawn(async move { start_server(source, options).await });
        let bind = format!("127.0.0.1:{port}");
        loop {
            if let Ok(stream) = TcpStream::connect(&bind).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        Ok((format!("http://{bind}/"), handle))
    }

    async fn act(url: &str, form: &[(&str, &str)]) -> Fallible<String> {
        let response = reqwest::Client::new().post(url).form(form).send().await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        Ok(response.text().await?)
    }

    #[tokio::test]
    async fn test_start_server_on_missing_snapshot() -> Fallible<()> {
        let source = Source::File(PathBuf::from("./derpherp.json"));
        let options = ServeOptions {
            port: 0,
            open_browser: false,
        };
        let result = start_server(source, options).await;
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: snapshot file does not exist.");
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("snapshot.json");
        write(&path, SNAPSHOT).await?;
        let (url, handle) = launch(&path).await?;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("{url}style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the not found endpoint.
        let response = reqwest::get(format!("{url}herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Hit the root endpoint.
        let response = reqwest::get(&url).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("Total XP: 502 kB"));
        assert!(html.contains("<title>ex1: 3 attempts</title>"));

        // Switch to the JS piscine.
        let html = act(&url, &[("action", "Group"), ("group", "piscine-js")]).await?;
        assert!(html.contains("/bahrain/bh-module/piscine-js/exercise-3: 700 B"));
        assert!(html.contains("Total XP: 700 B"));
        // The attempts chart is untouched.
        assert!(html.contains("<title>ex1: 3 attempts</title>"));

        // Pagination past the end is a no-op.
        let html = act(&url, &[("action", "BarNext")]).await?;
        assert!(html.contains("Total XP: 700 B"));
        let html = act(&url, &[("action", "AttemptsNext")]).await?;
        assert!(html.contains("1 / 1"));

        // An unknown group is rejected.
        let response = reqwest::Client::new()
            .post(&url)
            .form(&[("action", "Group"), ("group", "all")])
            .send()
            .await?;
        assert!(response.status().is_client_error());

        // Log out: the page says so, and the server stops.
        let html = act(&url, &[("action", "Logout")]).await?;
        assert!(html.contains("Logged out."));
        assert!(!html.contains("XP Overview"));
        let result = timeout(Duration::from_secs(5), handle)
            .await
            .map_err(|_| ErrorReport::new("server did not stop"))?;
        assert!(matches!(result, Ok(Ok(()))));
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("snapshot.json");
        write(&path, SNAPSHOT).await?;
        let (url, _handle) = launch(&path).await?;

        let html = act(&url, &[("action", "Group"), ("group", "bh-piscine")]).await?;
        assert!(html.contains("No XP data available."));

        // A refresh replaces the snapshot and resets the group.
        write(&path, r#"{"xp_view": [{"amount": 42, "path": "/bahrain/bh-module/new"}]}"#).await?;
        let html = act(&url, &[("action", "Refresh")]).await?;
        assert!(html.contains("Total XP: 42 B"));
        assert!(html.contains("User info not found."));
        assert!(html.contains("No progress data available."));

        // A failed refresh keeps the last snapshot and shows the error.
        remove_file(&path).await?;
        let html = act(&url, &[("action", "Refresh")]).await?;
        assert!(html.contains("does not exist."));
        assert!(html.contains("Total XP: 42 B"));
        Ok(())
    }
}
