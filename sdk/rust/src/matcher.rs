//! Row matcher
//!
//! Evaluates a [`Predicate`] against rows. Pure and total: absent fields and
//! values of mismatched kinds simply fail to match.

use crate::predicate::{Combinator, Operator, Predicate};
use crate::value::{FieldValue, Row};

/// Test a single row
pub fn matches(row: &Row, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Leaf { field, operator } => row
            .get(field)
            .is_some_and(|value| test_operator(value, operator)),
        Predicate::Group {
            combinator: Combinator::And,
            children,
        } => children.iter().all(|child| matches(row, child)),
        Predicate::Group {
            combinator: Combinator::Or,
            children,
        } => children.iter().any(|child| matches(row, child)),
    }
}

fn test_operator(value: &FieldValue, operator: &Operator) -> bool {
    match operator {
        Operator::Contains(needle) => value
            .as_text()
            .to_lowercase()
            .contains(&needle.to_lowercase()),
        Operator::Equals(expected) => value.as_text() == expected.as_str(),
        Operator::Between(low, high) => low <= value && value <= high,
    }
}

/// Rows matching the predicate, in input order
pub fn filter_rows<'a>(rows: &'a [Row], predicate: &Predicate) -> Vec<&'a Row> {
    let matched: Vec<&Row> = rows.iter().filter(|row| matches(row, predicate)).collect();
    tracing::trace!(total = rows.len(), matched = matched.len(), "Filtered rows");
    matched
}

/// Owning variant of [`filter_rows`]
pub fn filter_rows_owned(rows: Vec<Row>, predicate: &Predicate) -> Vec<Row> {
    let total = rows.len();
    let matched: Vec<Row> = rows
        .into_iter()
        .filter(|row| matches(row, predicate))
        .collect();
    tracing::trace!(total, matched = matched.len(), "Filtered rows");
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::criteria::{DateRange, FilterCriteria};
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, d, 0, 0, 0).unwrap()
    }

    fn request(id: &str, kind: &str, status: &str, creator: &str, created: u32) -> Row {
        Row::new()
            .with("requestId", id)
            .with("requestType", kind)
            .with("workflowStatus", status)
            .with("createdBy", creator)
            .with("createdAt", day(created))
    }

    fn sample() -> Vec<Row> {
        vec![
            request("REQ-1", "CREATE", "OPEN", "alice.smith@x.com", 1),
            request("REQ-2", "CHANGE", "APPROVED", "carol@x.com", 5),
            request("REQ-3", "CREATE", "REJECTED", "bob@x.com", 10),
        ]
    }

    fn ids(rows: &[&Row]) -> Vec<String> {
        rows.iter()
            .map(|r| r.text("requestId").unwrap().into_owned())
            .collect()
    }

    #[test]
    fn contains_is_case_insensitive() {
        let row = Row::new().with("createdBy", "Alice.Smith@X.com");
        assert!(matches(&row, &Predicate::contains("createdBy", "alice")));
        assert!(matches(&row, &Predicate::contains("createdBy", "SMITH@x")));
        assert!(!matches(&row, &Predicate::contains("createdBy", "carol")));
    }

    #[test]
    fn contains_on_absent_field_is_false() {
        let row = Row::new().with("requestId", "REQ-1");
        assert!(!matches(&row, &Predicate::contains("createdBy", "")));
    }

    #[test]
    fn equals_is_exact_and_case_sensitive() {
        let row = Row::new().with("requestType", "CREATE");
        assert!(matches(&row, &Predicate::equals("requestType", "CREATE")));
        assert!(!matches(&row, &Predicate::equals("requestType", "create")));
        assert!(!matches(&row, &Predicate::equals("requestType", "CREAT")));
        assert!(!matches(&row, &Predicate::equals("workflowStatus", "CREATE")));
    }

    #[test]
    fn equals_compares_number_display_text() {
        let row = Row::new().with("requestId", 1001_i64);
        assert!(matches(&row, &Predicate::equals("requestId", "1001")));

        let row: Row = serde_json::from_str(r#"{"requestId": 12345678901234567891}"#).unwrap();
        assert!(matches(
            &row,
            &Predicate::equals("requestId", "12345678901234567891")
        ));
    }

    #[test]
    fn text_operators_see_date_like_values_as_sent() {
        let row: Row = serde_json::from_str(
            r#"{"workflowStatus": "2024-01-05", "createdAt": "2024-03-15T10:00:00.250+02:00"}"#,
        )
        .unwrap();
        assert!(matches(&row, &Predicate::equals("workflowStatus", "2024-01-05")));
        assert!(matches(&row, &Predicate::contains("createdAt", ".250+02:00")));
        let range = Predicate::between(
            "createdAt",
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 15, 8, 0, 1).unwrap(),
        );
        assert!(matches(&row, &range));
    }

    #[test]
    fn between_is_inclusive() {
        let predicate = Predicate::between("createdAt", day(1), day(5));
        let rows = sample();
        assert!(matches(&rows[0], &predicate));
        assert!(matches(&rows[1], &predicate));
        assert!(!matches(&rows[2], &predicate));
    }

    #[test]
    fn between_rejects_mismatched_kinds() {
        let row = Row::new().with("createdAt", "last tuesday");
        assert!(!matches(&row, &Predicate::between("createdAt", day(1), day(5))));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let predicate = Predicate::between("createdAt", day(10), day(1));
        assert!(filter_rows(&sample(), &predicate).is_empty());
    }

    #[test]
    fn empty_groups() {
        let row = Row::new();
        assert!(matches(&row, &Predicate::all(Vec::new())));
        assert!(!matches(&row, &Predicate::any(Vec::new())));
    }

    #[test]
    fn identity_returns_input_unchanged() {
        let rows = sample();
        let predicate = compile(&FilterCriteria::new());
        let matched = filter_rows(&rows, &predicate);
        assert_eq!(matched, rows.iter().collect::<Vec<_>>());
    }

    #[test]
    fn request_type_scenario() {
        let rows = vec![
            Row::new().with("requestType", "CREATE").with("requestId", "A"),
            Row::new().with("requestType", "CHANGE").with("requestId", "B"),
        ];
        let predicate = compile(&FilterCriteria::new().with_request_type("CREATE"));
        assert_eq!(ids(&filter_rows(&rows, &predicate)), vec!["A"]);
    }

    #[test]
    fn created_by_scenario() {
        let rows = vec![
            Row::new().with("createdBy", "alice.smith@x.com").with("requestId", "A"),
            Row::new().with("createdBy", "carol@x.com").with("requestId", "B"),
        ];
        let predicate =
            compile(&FilterCriteria::new().with_created_by_names(["alice", "bob"]));
        assert_eq!(ids(&filter_rows(&rows, &predicate)), vec!["A"]);
    }

    #[test]
    fn combined_criteria_are_anded() {
        let criteria = FilterCriteria::new()
            .with_request_type("CREATE")
            .with_created_by_names(["bob", "carol"])
            .with_date_range(DateRange::new(day(2), day(30)));
        let rows = sample();
        let matched = filter_rows(&rows, &compile(&criteria));
        assert_eq!(ids(&matched), vec!["REQ-3"]);
    }

    #[test]
    fn start_only_range_filters_nothing() {
        let criteria = FilterCriteria::new().with_date_range(DateRange::starting(day(9)));
        assert_eq!(filter_rows(&sample(), &compile(&criteria)).len(), 3);
    }

    #[test]
    fn filtering_is_stable_and_idempotent() {
        let rows = sample();
        let predicate = compile(&FilterCriteria::new().with_request_type("CREATE"));

        let once = filter_rows_owned(rows.clone(), &predicate);
        let twice = filter_rows_owned(once.clone(), &predicate);

        assert_eq!(once, twice);
        assert_eq!(once, vec![rows[0].clone(), rows[2].clone()]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let predicate = compile(&FilterCriteria::new().with_request_type("CREATE"));
        assert!(filter_rows(&[], &predicate).is_empty());
        assert!(filter_rows_owned(Vec::new(), &predicate).is_empty());
    }
}
