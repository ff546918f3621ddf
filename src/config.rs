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

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

/// The file looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "xpboard.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// GraphQL endpoint of the learning platform.
    pub graphql_endpoint: String,
    /// Endpoint exchanging basic-auth credentials for a token.
    pub signin_endpoint: String,
    /// Port the dashboard listens on.
    pub port: u16,
    /// Timeout for every request to the platform, in seconds.
    pub timeout_secs: u64,
    /// Whether to open the dashboard in a browser on start.
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graphql_endpoint: "https://learn.reboot01.com/api/graphql-engine/v1/graphql"
                .to_string(),
            signin_endpoint: "https://learn.reboot01.com/api/auth/signin".to_string(),
            port: 8000,
            timeout_secs: 30,
            open_browser: true,
        }
    }
}

impl Config {
    /// Loads the configuration from `path` if given, otherwise from
    /// `xpboard.toml` in the working directory if it exists, otherwise
    /// returns the defaults.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return fail(format!("config file {} does not exist.", path.display()));
                }
                Self::read(path)
            }
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::read(path)
                } else {
                    log::debug!("No {CONFIG_FILE}, using defaults.");
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Fallible<Self> {
        log::debug!("Reading configuration from {}.", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Fallible<Self> {
        let config: Config = toml::from_str(content)?;
        if config.timeout_secs == 0 {
            return fail("timeout_secs must be positive.");
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_empty_file_is_default() -> Fallible<()> {
        assert_eq!(Config::from_toml("")?, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file() -> Fallible<()> {
        let config = Config::from_toml("port = 9000\nopen_browser = false\n")?;
        assert_eq!(config.port, 9000);
        assert!(!config.open_browser);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        Ok(())
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(Config::from_toml("prot = 9000").is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(Config::from_toml("timeout_secs = 0").is_err());
    }

    #[test]
    fn test_load_explicit_path() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("custom.toml");
        write(&path, "graphql_endpoint = \"http://localhost:1/graphql\"\n")?;
        let config = Config::load(Some(&path))?;
        assert_eq!(config.graphql_endpoint, "http://localhost:1/graphql");
        Ok(())
    }

    #[test]
    fn test_load_missing_path() {
        assert!(Config::load(Some(Path::new("./derpherp.toml"))).is_err());
    }
}
