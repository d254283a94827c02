//! Latest-affiliation selection
//!
//! Records are partitioned by `AuthorRecord::identity`, each partition is
//! ranked newest-first by publication date, and one winner is picked per
//! partition according to the selection policy.

use std::collections::HashMap;

use crate::domain::AuthorRecord;

/// How a winner is picked inside one identity group
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Always the most recent record, even if its affiliation is missing
    MostRecent,
    /// The most recent record that has an affiliation; falls back to the
    /// most recent record when no record in the group has one
    MostRecentWithAffiliation,
}

impl SelectionPolicy {
    pub fn from_skip_none(skip_none_affiliations: bool) -> Self {
        if skip_none_affiliations {
            SelectionPolicy::MostRecentWithAffiliation
        } else {
            SelectionPolicy::MostRecent
        }
    }
}

/// Select one record per identity.
///
/// Output holds exactly one record for every distinct identity in the
/// input, in order of each identity's first appearance. Records without
/// an identity are ignored. Dates that tie keep their input order.
pub fn select_latest(records: &[AuthorRecord], skip_none_affiliations: bool) -> Vec<AuthorRecord> {
    select_latest_with_policy(records, SelectionPolicy::from_skip_none(skip_none_affiliations))
}

/// Select one record per identity under an explicit policy.
pub fn select_latest_with_policy(
    records: &[AuthorRecord],
    policy: SelectionPolicy,
) -> Vec<AuthorRecord> {
    let groups = group_by_identity(records);

    let winners: Vec<AuthorRecord> = groups
        .into_iter()
        .filter_map(|mut group| {
            rank_newest_first(&mut group);
            pick(&group, policy).cloned()
        })
        .collect();

    tracing::debug!(
        input = records.len(),
        identities = winners.len(),
        ?policy,
        "Selected latest affiliation per author"
    );

    winners
}

/// Partition records by identity, preserving first-appearance order of
/// identities and input order within each partition.
fn group_by_identity(records: &[AuthorRecord]) -> Vec<Vec<&AuthorRecord>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<&AuthorRecord>> = Vec::new();
    let mut anonymous = 0usize;

    for record in records {
        let Some(identity) = record.identity() else {
            anonymous += 1;
            continue;
        };

        match index.get(&identity) {
            Some(&slot) => groups[slot].push(record),
            None => {
                index.insert(identity, groups.len());
                groups.push(vec![record]);
            }
        }
    }

    if anonymous > 0 {
        tracing::warn!(count = anonymous, "Ignoring records without an author name");
    }

    groups
}

/// Sort newest first. `sort_by` is stable, so equal dates keep input order.
fn rank_newest_first(group: &mut [&AuthorRecord]) {
    group.sort_by(|a, b| b.affiliation_date.sort_key().cmp(&a.affiliation_date.sort_key()));
}

fn pick<'a>(ranked: &[&'a AuthorRecord], policy: SelectionPolicy) -> Option<&'a AuthorRecord> {
    let newest = ranked.first().copied()?;

    match policy {
        SelectionPolicy::MostRecent => Some(newest),
        SelectionPolicy::MostRecentWithAffiliation => Some(
            ranked
                .iter()
                .copied()
                .find(|record| record.affiliation.is_some())
                .unwrap_or(newest),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PubDate;

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

    fn yates_history() -> Vec<AuthorRecord> {
        vec![
            yates("2021-01-01", Some("TSRI"), "Title 1"),
            yates("2021-01-02", Some("TSRI"), "Title 2"),
            yates("2021-01-03", Some("TSRI"), "Title 3"),
            yates("2021-01-04", None, "Title 4"),
        ]
    }

    #[test]
    fn test_picks_most_recent() {
        let records = &yates_history()[..3];
        let result = select_latest(records, false);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].source_title.as_deref(), Some("Title 3"));
    }

    #[test]
    fn test_skip_none_prefers_known_affiliation() {
        let result = select_latest(&yates_history(), true);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].affiliation.as_deref(), Some("TSRI"));
        assert_eq!(result[0].affiliation_date.to_string(), "2021-01-03");
    }

    #[test]
    fn test_without_skip_takes_newest_even_if_missing() {
        let result = select_latest(&yates_history(), false);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].affiliation, None);
        assert_eq!(result[0].affiliation_date.to_string(), "2021-01-04");
    }

    #[test]
    fn test_all_missing_falls_back_to_newest() {
        let records = vec![
            yates("2020-05-01", None, "Old"),
            yates("2022-05-01", None, "New"),
        ];
        let result = select_latest(&records, true);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].source_title.as_deref(), Some("New"));
    }

    #[test]
    fn test_single_record_group() {
        let records = vec![yates("2020-05-01", None, "Only")];
        assert_eq!(select_latest(&records, true), records);
        assert_eq!(select_latest(&records, false), records);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![
            yates("2021-06-01", Some("First"), "A"),
            yates("2021-06-01", Some("Second"), "B"),
        ];
        let result = select_latest(&records, false);
        assert_eq!(result[0].affiliation.as_deref(), Some("First"));
    }

    #[test]
    fn test_year_only_ties_with_january_first() {
        let records = vec![
            AuthorRecord::new(PubDate::from_year(2021).unwrap())
                .with_last_name("Lee")
                .with_affiliation("Year only"),
            AuthorRecord::new(PubDate::from_ymd(2021, 1, 1).unwrap())
                .with_last_name("Lee")
                .with_affiliation("Full date"),
            AuthorRecord::new(PubDate::from_ymd(2020, 12, 31).unwrap())
                .with_last_name("Lee")
                .with_affiliation("Older"),
        ];
        let result = select_latest(&records, false);
        assert_eq!(result[0].affiliation.as_deref(), Some("Year only"));
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let records = vec![
            AuthorRecord::new("2020".parse().unwrap()).with_last_name("Zed"),
            AuthorRecord::new("2020".parse().unwrap()).with_last_name("Abe"),
            AuthorRecord::new("2021".parse().unwrap()).with_last_name("Zed"),
        ];
        let result = select_latest(&records, false);
        let names: Vec<_> = result.iter().filter_map(|r| r.identity()).collect();
        assert_eq!(names, vec!["Zed", "Abe"]);
    }

    #[test]
    fn test_records_without_identity_are_ignored() {
        let records = vec![
            AuthorRecord::new("2020".parse().unwrap()).with_affiliation("Nowhere"),
            AuthorRecord::new("2020".parse().unwrap()).with_last_name("Abe"),
        ];
        let result = select_latest(&records, true);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].identity().as_deref(), Some("Abe"));
    }

    #[test]
    fn test_empty_input() {
        assert!(select_latest(&[], true).is_empty());
    }
}
