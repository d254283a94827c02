//! Latest-affiliation selection tests
//!
//! Scenario tests plus property-based checks of the selection policy

use std::collections::{HashMap, HashSet};

use affil_core::domain::{AuthorRecord, PubDate};
use affil_core::select_latest;
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn yates(date: &str, affiliation: Option<&str>, title: &str) -> AuthorRecord {
    let record = AuthorRecord::new(date.parse().unwrap())
        .with_last_name("Yates")
        .with_first_name("John R")
        .with_initials("JR")
        .with_source_title(title);
    match affiliation {
        Some(a) => record.with_affiliation(a),
        None => record,
    }
}

// === Documented scenario ===

#[test]
fn test_yates_scenario_skip_none() {
    let records = vec![
        yates("2021-01-01", Some("TSRI"), "Title 1"),
        yates("2021-01-02", Some("TSRI"), "Title 2"),
        yates("2021-01-03", Some("TSRI"), "Title 3"),
        yates("2021-01-04", None, "Title 4"),
    ];

    let result = select_latest(&records, true);
    assert_eq!(result, vec![records[2].clone()]);
}

#[test]
fn test_yates_scenario_keep_none() {
    let records = vec![
        yates("2021-01-01", Some("TSRI"), "Title 1"),
        yates("2021-01-02", Some("TSRI"), "Title 2"),
        yates("2021-01-03", Some("TSRI"), "Title 3"),
        yates("2021-01-04", None, "Title 4"),
    ];

    let result = select_latest(&records, false);
    assert_eq!(result, vec![records[3].clone()]);
}

#[test]
fn test_input_order_does_not_change_winner() {
    let forward = vec![
        yates("2021-01-01", Some("Old"), "A"),
        yates("2021-03-01", Some("New"), "B"),
    ];
    let mut backward = forward.clone();
    backward.reverse();

    assert_eq!(select_latest(&forward, true), select_latest(&backward, true));
}

#[test]
fn test_several_people() {
    let records = vec![
        yates("2020-01-01", Some("TSRI"), "A"),
        AuthorRecord::new("2022-02-02".parse().unwrap())
            .with_last_name("Garrett")
            .with_first_name("Patrick")
            .with_affiliation("Scripps"),
        yates("2023-01-01", None, "B"),
        AuthorRecord::new("2019".parse().unwrap())
            .with_last_name("Garrett")
            .with_first_name("Patrick")
            .with_affiliation("UCSD"),
    ];

    let result = select_latest(&records, true);
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].identity().as_deref(), Some("Yates, John R"));
    assert_eq!(result[0].affiliation.as_deref(), Some("TSRI"));
    assert_eq!(result[1].identity().as_deref(), Some("Garrett, Patrick"));
    assert_eq!(result[1].affiliation.as_deref(), Some("Scripps"));
}

#[test]
fn test_mixed_precision_dates() {
    let records = vec![
        AuthorRecord::new(PubDate::from_year(2021).unwrap())
            .with_last_name("Lee")
            .with_affiliation("Year"),
        AuthorRecord::new(PubDate::from_year_month(2021, 2).unwrap())
            .with_last_name("Lee")
            .with_affiliation("Month"),
        AuthorRecord::new(PubDate::from_ymd(2021, 1, 15).unwrap())
            .with_last_name("Lee")
            .with_affiliation("Day"),
    ];

    let result = select_latest(&records, false);
    assert_eq!(result[0].affiliation.as_deref(), Some("Month"));
}

// === Property-based tests ===

const NAMES: [&str; 4] = ["Yates", "Garrett", "Lee", "Jones"];

fn record_strategy() -> impl Strategy<Value = AuthorRecord> {
    (0usize..NAMES.len(), 0i64..90, any::<bool>()).prop_map(|(name, offset, has_affiliation)| {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let record = AuthorRecord::new(PubDate::from_date(base + Duration::days(offset)))
            .with_last_name(NAMES[name]);
        if has_affiliation {
            record.with_affiliation(format!("Institute {}", offset))
        } else {
            record
        }
    })
}

fn groups(records: &[AuthorRecord]) -> HashMap<String, Vec<&AuthorRecord>> {
    let mut map: HashMap<String, Vec<&AuthorRecord>> = HashMap::new();
    for record in records {
        map.entry(record.identity().unwrap()).or_default().push(record);
    }
    map
}

proptest! {
    #[test]
    fn test_one_record_per_identity(
        records in prop::collection::vec(record_strategy(), 0..40),
        skip in any::<bool>(),
    ) {
        let result = select_latest(&records, skip);
        let expected: HashSet<String> = records.iter().filter_map(|r| r.identity()).collect();
        let got: Vec<String> = result.iter().filter_map(|r| r.identity()).collect();
        let unique: HashSet<String> = got.iter().cloned().collect();

        prop_assert_eq!(got.len(), unique.len(), "identities must not repeat");
        prop_assert_eq!(unique, expected);
    }

    #[test]
    fn test_skip_none_prefers_latest_known_affiliation(
        records in prop::collection::vec(record_strategy(), 1..40),
    ) {
        let result = select_latest(&records, true);
        let by_identity = groups(&records);

        for winner in &result {
            let group = &by_identity[&winner.identity().unwrap()];
            let known: Vec<_> = group.iter().filter(|r| r.affiliation.is_some()).collect();

            if known.is_empty() {
                let newest = group.iter().map(|r| r.affiliation_date.sort_key()).max().unwrap();
                prop_assert_eq!(winner.affiliation_date.sort_key(), newest);
            } else {
                prop_assert!(winner.affiliation.is_some());
                for other in known {
                    prop_assert!(winner.affiliation_date.sort_key() >= other.affiliation_date.sort_key());
                }
            }
        }
    }

    #[test]
    fn test_keep_none_takes_max_date(
        records in prop::collection::vec(record_strategy(), 1..40),
    ) {
        let result = select_latest(&records, false);
        let by_identity = groups(&records);

        for winner in &result {
            let group = &by_identity[&winner.identity().unwrap()];
            let newest = group.iter().map(|r| r.affiliation_date.sort_key()).max().unwrap();
            prop_assert_eq!(winner.affiliation_date.sort_key(), newest);
        }
    }

    #[test]
    fn test_selection_is_deterministic(
        records in prop::collection::vec(record_strategy(), 0..40),
        skip in any::<bool>(),
    ) {
        prop_assert_eq!(select_latest(&records, skip), select_latest(&records, skip));
    }
}
