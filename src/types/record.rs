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

use serde::Deserialize;
use serde::Deserializer;
use serde_json::Value;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::timestamp::Timestamp;

/// An XP amount as it arrives on the wire: the platform sends a number, but
/// numeric columns are sometimes serialized as strings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Parses the amount. Anything that is not a finite number is an error:
    /// coercing it to zero would corrupt totals without anyone noticing.
    pub fn value(&self) -> Fallible<f64> {
        let value = match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ErrorReport::data(format!("invalid XP amount: {s:?}")))?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ErrorReport::data(format!("invalid XP amount: {value}")))
        }
    }
}

/// One XP ledger entry.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct XpRecord {
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub path: Option<String>,
}

impl XpRecord {
    /// The record's category path, if it has a non-empty one.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref().filter(|path| !path.is_empty())
    }

    pub fn amount(&self) -> Fallible<f64> {
        match &self.amount {
            Some(amount) => amount.value(),
            None => Err(ErrorReport::data(format!(
                "missing XP amount for {}",
                self.path().unwrap_or("record without path")
            ))),
        }
    }
}

/// One graded submission.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub path: Option<String>,
    /// `None` when the platform sent no usable timestamp. Such records sort
    /// before all others.
    #[serde(rename = "createdAt", default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub grade: Option<f64>,
}

impl ProgressRecord {
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref().filter(|path| !path.is_empty())
    }

    /// Only a grade of exactly 1 counts as a pass.
    pub fn is_success(&self) -> bool {
        self.grade == Some(1.0)
    }
}

/// A missing or unparsable timestamp loses the record its place in time,
/// but not the rest of the snapshot.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => match Timestamp::parse(&s) {
            Ok(ts) => Ok(Some(ts)),
            Err(e) => {
                log::warn!("Ignoring progress timestamp: {}", e.message());
                Ok(None)
            }
        },
        Some(other) => {
            log::warn!("Ignoring progress timestamp: {other}");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_amount_number_or_string() -> Fallible<()> {
        let records: Vec<XpRecord> = serde_json::from_str(
            r#"[{"amount": 1500, "path": "/a"}, {"amount": "500000", "path": "/b"}]"#,
        )?;
        assert_eq!(records[0].amount()?, 1500.0);
        assert_eq!(records[1].amount()?, 500000.0);
        Ok(())
    }

    #[test]
    fn test_amount_errors() {
        let garbage = XpRecord {
            amount: Some(Amount::Text("lots".to_string())),
            path: Some("/bh-module/x".to_string()),
        };
        assert_eq!(garbage.amount().unwrap_err().kind(), ErrorKind::Data);
        let missing = XpRecord {
            amount: None,
            path: Some("/bh-module/x".to_string()),
        };
        assert_eq!(
            missing.amount().unwrap_err().message(),
            "missing XP amount for /bh-module/x"
        );
        let nan = XpRecord {
            amount: Some(Amount::Text("NaN".to_string())),
            path: None,
        };
        assert!(nan.amount().is_err());
    }

    #[test]
    fn test_empty_path_is_no_path() {
        let record = XpRecord {
            amount: None,
            path: Some(String::new()),
        };
        assert_eq!(record.path(), None);
    }

    #[test]
    fn test_progress_success() -> Fallible<()> {
        let records: Vec<ProgressRecord> = serde_json::from_str(
            r#"[
                {"path": "/a/ex1", "createdAt": "2024-01-01T00:00:00+00:00", "grade": 1},
                {"path": "/a/ex1", "createdAt": "2024-01-01T00:00:00+00:00", "grade": 0.5},
                {"path": "/a/ex1", "createdAt": "2024-01-01T00:00:00+00:00", "grade": null}
            ]"#,
        )?;
        assert!(records[0].is_success());
        assert!(!records[1].is_success());
        assert!(!records[2].is_success());
        Ok(())
    }

    #[test]
    fn test_unusable_timestamps() -> Fallible<()> {
        let records: Vec<ProgressRecord> = serde_json::from_str(
            r#"[
                {"path": "/a/ex1", "createdAt": null, "grade": 0},
                {"path": "/a/ex1", "createdAt": "last tuesday", "grade": 0},
                {"path": "/a/ex1", "grade": 1},
                {"path": "/a/ex1", "createdAt": "2024-01-01T00:00:00Z", "grade": 1}
            ]"#,
        )?;
        assert_eq!(records.len(), 4);
        assert!(records[..3].iter().all(|r| r.created_at.is_none()));
        assert!(records[3].created_at.is_some());
        Ok(())
    }
}
