use crate::models::{DerivedRecord, QueryResult};

/// Drops everything but letters and digits, then uppercases. Search input
/// arrives free-form, so this is looser than record normalization.
pub fn normalize_search(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase()
}

/// Prefix-matches a search string against the derived dataset. Read-only:
/// ranks and metrics are never touched. An empty normalized search matches
/// every record and comes back as ambiguous rather than a spurious find.
pub fn lookup(records: &[DerivedRecord], search: &str) -> QueryResult {
    let needle = normalize_search(search);
    let matches: Vec<&DerivedRecord> = records
        .iter()
        .filter(|record| record.reg_no.starts_with(&needle))
        .collect();

    match matches.len() {
        0 => QueryResult::NotFound,
        1 => QueryResult::Found(matches[0].clone()),
        _ => QueryResult::Ambiguous(matches.iter().map(|r| r.reg_no.clone()).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;
    use crate::models::{Grade, RawRecord, Status, WeightPolicy};

    fn dataset() -> Vec<DerivedRecord> {
        let records = vec![
            RawRecord {
                reg_no: "IT23831322".to_string(),
                ca_percent: Some(78.5),
                grade: Grade::AMinus,
                status: Status::Pass,
            },
            RawRecord {
                reg_no: "IT23831399".to_string(),
                ca_percent: Some(42.0),
                grade: Grade::CMinus,
                status: Status::Fail,
            },
            RawRecord {
                reg_no: "IT24110001".to_string(),
                ca_percent: Some(88.0),
                grade: Grade::A,
                status: Status::Pass,
            },
        ];
        metrics::derive_with_ca(
            &records,
            WeightPolicy {
                ca_weight: 0.4,
                final_weight: 0.6,
            },
        )
    }

    #[test]
    fn exact_id_finds_one_record() {
        let result = lookup(&dataset(), "IT23831322");
        match result {
            QueryResult::Found(record) => assert_eq!(record.reg_no, "IT23831322"),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn search_is_normalized_before_matching() {
        let result = lookup(&dataset(), " it-2411 0001 ");
        assert!(matches!(result, QueryResult::Found(r) if r.reg_no == "IT24110001"));
    }

    #[test]
    fn shared_prefix_is_ambiguous() {
        let result = lookup(&dataset(), "IT2383");
        match result {
            QueryResult::Ambiguous(ids) => {
                assert_eq!(ids.len(), 2);
                assert!(ids.contains(&"IT23831322".to_string()));
                assert!(ids.contains(&"IT23831399".to_string()));
            }
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn unknown_prefix_is_not_found() {
        assert!(matches!(lookup(&dataset(), "IT9999"), QueryResult::NotFound));
    }
}
