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
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// One of the top-level curriculum branches XP can be filtered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryGroup {
    #[default]
    BhModule,
    PiscineJs,
    BhPiscine,
}

impl CategoryGroup {
    /// All groups, in the order the selector shows them.
    pub const ALL: [CategoryGroup; 3] = [
        CategoryGroup::BhModule,
        CategoryGroup::PiscineJs,
        CategoryGroup::BhPiscine,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CategoryGroup::BhModule => "bh-module",
            CategoryGroup::PiscineJs => "piscine-js",
            CategoryGroup::BhPiscine => "bh-piscine",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryGroup::BhModule => "BH Module",
            CategoryGroup::PiscineJs => "Piscine JS",
            CategoryGroup::BhPiscine => "BH Piscine",
        }
    }
}

impl Display for CategoryGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for CategoryGroup {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryGroup::ALL
            .into_iter()
            .find(|group| group.key() == s)
            .ok_or_else(|| ErrorReport::new(format!("unknown group: {s}")))
    }
}
