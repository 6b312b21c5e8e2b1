//! Filter criteria
//!
//! A [`FilterCriteria`] is the snapshot of the filter bar taken at the moment
//! the user runs a search. It is built fresh for every search and never
//! mutated after compiling.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Creation date range selected in the filter bar
///
/// Either bound may be missing while the user is still picking dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn starting(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn ending(end: DateTime<Utc>) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Both bounds, or nothing
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.start.zip(self.end)
    }

    pub fn is_partial(&self) -> bool {
        self.start.is_some() != self.end.is_some()
    }

    /// End before start. Such ranges are kept as entered.
    pub fn is_inverted(&self) -> bool {
        self.bounds().is_some_and(|(start, end)| end < start)
    }
}

/// Normalized user search input for one query action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_status: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub created_by_names: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_search: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(mut self, value: impl AsRef<str>) -> Self {
        self.request_id = normalize(value.as_ref());
        self
    }

    pub fn with_request_type(mut self, value: impl AsRef<str>) -> Self {
        self.request_type = normalize(value.as_ref());
        self
    }

    pub fn with_workflow_status(mut self, value: impl AsRef<str>) -> Self {
        self.workflow_status = normalize(value.as_ref());
        self
    }

    /// Add one created-by name; blanks are skipped
    pub fn with_created_by(mut self, name: impl AsRef<str>) -> Self {
        if let Some(name) = normalize(name.as_ref()) {
            self.created_by_names.insert(name);
        }
        self
    }

    pub fn with_created_by_names<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .fold(self, |criteria, name| criteria.with_created_by(name))
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = (range != DateRange::default()).then_some(range);
        self
    }

    pub fn with_global_search(mut self, value: impl AsRef<str>) -> Self {
        self.global_search = normalize(value.as_ref());
        self
    }

    /// True when no criterion would contribute to a predicate
    pub fn is_empty(&self) -> bool {
        non_blank(&self.request_id).is_none()
            && non_blank(&self.request_type).is_none()
            && non_blank(&self.workflow_status).is_none()
            && self.created_by_names.iter().all(|n| n.trim().is_empty())
            && self.date_range.and_then(|r| r.bounds()).is_none()
            && non_blank(&self.global_search).is_none()
    }
}

/// Trim and drop empty input
fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trimmed view of an optional field, `None` when blank.
///
/// Fields are public and may be set (or deserialized) without going through
/// the builder methods, so readers normalize again.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn blank_input_is_absent() {
        let criteria = FilterCriteria::new()
            .with_request_id("   ")
            .with_request_type("")
            .with_created_by(" ");

        assert!(criteria.request_id.is_none());
        assert!(criteria.request_type.is_none());
        assert!(criteria.created_by_names.is_empty());
        assert!(criteria.is_empty());
    }

    #[test]
    fn values_are_trimmed() {
        let criteria = FilterCriteria::new().with_request_id("  REQ-7 ");
        assert_eq!(criteria.request_id.as_deref(), Some("REQ-7"));
    }

    #[test]
    fn created_by_names_deduplicate() {
        let criteria = FilterCriteria::new().with_created_by_names(["bob", "alice", "bob"]);
        let names: Vec<_> = criteria.created_by_names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn partial_date_range_counts_as_empty() {
        let criteria = FilterCriteria::new().with_date_range(DateRange::starting(day(1)));
        assert!(criteria.date_range.is_some());
        assert!(criteria.is_empty());
    }

    #[test]
    fn empty_date_range_is_dropped() {
        let criteria = FilterCriteria::new().with_date_range(DateRange::default());
        assert!(criteria.date_range.is_none());
    }

    #[test]
    fn date_range_bounds_both_or_nothing() {
        assert_eq!(DateRange::new(day(1), day(2)).bounds(), Some((day(1), day(2))));
        assert_eq!(DateRange::starting(day(1)).bounds(), None);
        assert_eq!(DateRange::ending(day(2)).bounds(), None);
        assert!(DateRange::ending(day(2)).is_partial());
    }

    #[test]
    fn date_range_inverted() {
        assert!(DateRange::new(day(5), day(1)).is_inverted());
        assert!(!DateRange::new(day(1), day(5)).is_inverted());
        assert!(!DateRange::starting(day(5)).is_inverted());
    }

    #[test]
    fn serde_uses_camel_case_and_skips_absent() {
        let criteria = FilterCriteria::new()
            .with_request_type("CREATE")
            .with_created_by("alice");
        let json = serde_json::to_value(&criteria).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "requestType": "CREATE", "createdByNames": ["alice"] })
        );

        let back: FilterCriteria = serde_json::from_value(json).unwrap();
        assert_eq!(back, criteria);
    }
}
