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

use clap::Parser;

use crate::client::Client;
use crate::client::NO_TOKEN;
use crate::client::Source;
use crate::cmd::login::login;
use crate::cmd::report::ReportFormat;
use crate::cmd::report::print_report;
use crate::cmd::serve::server::ServeOptions;
use crate::cmd::serve::server::start_server;
use crate::config::Config;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::group::CategoryGroup;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the dashboard in the browser.
    Serve {
        /// Read data from a saved GraphQL response instead of the platform.
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Token from `xpboard login`.
        #[arg(long, env = "XPBOARD_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// The port to use for the web server. Overrides the configuration.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open the browser automatically.
        #[arg(long)]
        no_open: bool,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Sign in and print a token.
    Login {
        #[arg(long)]
        username: String,
        /// Read from standard input if not given.
        #[arg(long, env = "XPBOARD_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the first page of the dashboard.
    Report {
        /// Read data from a saved GraphQL response instead of the platform.
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Token from `xpboard login`.
        #[arg(long, env = "XPBOARD_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// Which XP category to chart.
        #[arg(long, default_value_t = CategoryGroup::BhModule)]
        group: CategoryGroup,
        /// Output format.
        #[arg(long, default_value_t = ReportFormat::Html)]
        format: ReportFormat,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            snapshot,
            token,
            port,
            no_open,
            config,
        } => {
            let config = Config::load(config.as_deref())?;
            let options = ServeOptions {
                port: port.unwrap_or(config.port),
                open_browser: config.open_browser && !no_open,
            };
            let source = make_source(&config, snapshot, token)?;
            start_server(source, options).await
        }
        Command::Login {
            username,
            password,
            config,
        } => {
            let config = Config::load(config.as_deref())?;
            let client = Client::new(&config)?;
            login(&client, &username, password).await
        }
        Command::Report {
            snapshot,
            token,
            group,
            format,
            config,
        } => {
            let config = Config::load(config.as_deref())?;
            let source = make_source(&config, snapshot, token)?;
            print_report(&source, group, format).await
        }
    }
}

/// A snapshot file wins over a token.
fn make_source(
    config: &Config,
    snapshot: Option<PathBuf>,
    token: Option<String>,
) -> Fallible<Source> {
    match (snapshot, token) {
        (Some(path), _) => Ok(Source::File(path)),
        (None, Some(token)) => Source::remote(Client::new(config)?, token),
        (None, None) => Err(ErrorReport::auth(NO_TOKEN)),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_command_is_well_formed() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_snapshot_wins_over_token() {
        let source = make_source(
            &Config::default(),
            Some(PathBuf::from("snapshot.json")),
            Some("garbage".to_string()),
        )
        .unwrap();
        assert!(matches!(source, Source::File(_)));
    }

    #[test]
    fn test_no_token() {
        let err = make_source(&Config::default(), None, None).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.message(), NO_TOKEN);
    }
}
