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

use std::collections::BTreeMap;

use crate::error::Fallible;
use crate::path::classify;
use crate::types::group::CategoryGroup;
use crate::types::record::XpRecord;

const PISCINE_JS: &str = "piscine-js";

/// XP summed per category path. Keys are kept sorted.
pub type XpBuckets = BTreeMap<String, f64>;

/// Returns the records belonging to `group`. Records without a path never
/// belong to any group.
pub fn filter_by_group(records: &[XpRecord], group: CategoryGroup) -> Vec<&XpRecord> {
    records
        .iter()
        .filter(|record| match record.path() {
            Some(path) => in_group(path, group),
            None => false,
        })
        .collect()
}

/// Whether a classified path falls under `group`.
fn in_group(path: &str, group: CategoryGroup) -> bool {
    let c = classify(path);
    // The JS piscine lives inside the module tree, but its exercises are
    // counted separately.
    let nested_piscine = c.subproject == PISCINE_JS && !c.subsegment.is_empty();
    match group {
        CategoryGroup::BhPiscine => c.group == "bh-piscine",
        CategoryGroup::BhModule => c.group == "bh-module" && !nested_piscine,
        CategoryGroup::PiscineJs => c.group == "bh-module" && nested_piscine,
    }
}

/// Sums amounts per path. Fails on the first amount that is not a number.
pub fn aggregate_by_path(records: &[&XpRecord]) -> Fallible<XpBuckets> {
    let mut buckets = XpBuckets::new();
    for record in records {
        let amount = record.amount()?;
        let key = record.path().unwrap_or("Unknown").to_string();
        *buckets.entry(key).or_insert(0.0) += amount;
    }
    Ok(buckets)
}

pub fn total(buckets: &XpBuckets) -> f64 {
    buckets.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::format::format_xp;
    use crate::types::record::Amount;

    fn xp(amount: &str, path: &str) -> XpRecord {
        XpRecord {
            amount: Some(Amount::Text(amount.to_string())),
            path: Some(path.to_string()),
        }
    }

    fn fixture() -> Vec<XpRecord> {
        vec![
            xp("100", "/bahrain/bh-module/ascii-art"),
            xp("200", "/bahrain/bh-module/piscine-js/exercise-1"),
            xp("300", "/bahrain/bh-module/piscine-js"),
            xp("400", "/bahrain/bh-piscine/quest-01"),
            xp("500", "/bahrain/bh-onboarding/welcome"),
            XpRecord {
                amount: Some(Amount::Number(600.0)),
                path: None,
            },
            xp("700", "/bahrain/BH-Module/Piscine-JS/Exercise-2"),
        ]
    }

    fn paths(records: &[&XpRecord]) -> Vec<String> {
        records
            .iter()
            .filter_map(|r| r.path().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_bh_module_excludes_nested_piscine() {
        let records = fixture();
        let filtered = filter_by_group(&records, CategoryGroup::BhModule);
        assert_eq!(
            paths(&filtered),
            vec![
                "/bahrain/bh-module/ascii-art".to_string(),
                "/bahrain/bh-module/piscine-js".to_string(),
            ]
        );
    }

    #[test]
    fn test_piscine_js() {
        let records = fixture();
        let filtered = filter_by_group(&records, CategoryGroup::PiscineJs);
        assert_eq!(
            paths(&filtered),
            vec![
                "/bahrain/bh-module/piscine-js/exercise-1".to_string(),
                "/bahrain/BH-Module/Piscine-JS/Exercise-2".to_string(),
            ]
        );
    }

    #[test]
    fn test_piscine_js_scenario() {
        let records = vec![
            xp("1", "/bahrain/bh-module/piscine-js/exercise-1"),
            xp("1", "/bahrain/bh-module/exercise-1"),
        ];
        let filtered = filter_by_group(&records, CategoryGroup::PiscineJs);
        assert_eq!(
            paths(&filtered),
            vec!["/bahrain/bh-module/piscine-js/exercise-1".to_string()]
        );
    }

    #[test]
    fn test_bh_piscine() {
        let records = fixture();
        let filtered = filter_by_group(&records, CategoryGroup::BhPiscine);
        assert_eq!(
            paths(&filtered),
            vec!["/bahrain/bh-piscine/quest-01".to_string()]
        );
    }

    #[test]
    fn test_unknown_group_name() {
        assert!("all".parse::<CategoryGroup>().is_err());
        assert!("bh-onboarding".parse::<CategoryGroup>().is_err());
    }

    #[test]
    fn test_groups_are_disjoint() {
        let records = fixture();
        for record in &records {
            let matches = CategoryGroup::ALL
                .into_iter()
                .filter(|group| {
                    filter_by_group(std::slice::from_ref(record), *group).len() == 1
                })
                .count();
            assert!(matches <= 1, "{:?} is in {matches} groups", record.path);
        }
    }

    #[test]
    fn test_aggregate_scenario() -> Fallible<()> {
        let records = vec![
            xp("1500", "/bahrain/bh-module/exercise-1"),
            xp("500000", "/bahrain/bh-module/exercise-2"),
        ];
        let filtered = filter_by_group(&records, CategoryGroup::BhModule);
        let buckets = aggregate_by_path(&filtered)?;
        assert_eq!(total(&buckets), 501500.0);
        assert_eq!(format_xp(total(&buckets)), "502 kB");
        Ok(())
    }

    #[test]
    fn test_aggregate_sums_same_path() -> Fallible<()> {
        let records = vec![
            xp("10", "/bahrain/bh-module/b"),
            xp("5", "/bahrain/bh-module/a"),
            xp("2.5", "/bahrain/bh-module/b"),
        ];
        let filtered = filter_by_group(&records, CategoryGroup::BhModule);
        let buckets = aggregate_by_path(&filtered)?;
        let keys: Vec<&String> = buckets.keys().collect();
        assert_eq!(keys, vec!["/bahrain/bh-module/a", "/bahrain/bh-module/b"]);
        assert_eq!(buckets["/bahrain/bh-module/b"], 12.5);
        Ok(())
    }

    #[test]
    fn test_total_is_order_independent() -> Fallible<()> {
        let records = fixture()
            .into_iter()
            .filter(|r| r.path().is_some())
            .collect::<Vec<_>>();
        let mut reversed = records.clone();
        reversed.reverse();
        for group in CategoryGroup::ALL {
            let forward = filter_by_group(&records, group);
            let backward = filter_by_group(&reversed, group);
            let expected: f64 = forward.iter().map(|r| r.amount().unwrap()).sum();
            assert_eq!(total(&aggregate_by_path(&forward)?), expected);
            assert_eq!(total(&aggregate_by_path(&backward)?), expected);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_amount_fails_loudly() {
        let records = vec![
            xp("10", "/bahrain/bh-module/a"),
            xp("ten", "/bahrain/bh-module/b"),
        ];
        let filtered = filter_by_group(&records, CategoryGroup::BhModule);
        let err = aggregate_by_path(&filtered).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn test_empty() -> Fallible<()> {
        let buckets = aggregate_by_path(&[])?;
        assert!(buckets.is_empty());
        assert_eq!(total(&buckets), 0.0);
        Ok(())
    }
}
