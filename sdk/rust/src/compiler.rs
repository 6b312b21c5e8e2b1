//! Filter compiler
//!
//! Turns [`FilterCriteria`] into a [`Predicate`] tree. Every populated
//! criterion contributes one clause and all clauses are AND-ed together;
//! multi-valued criteria (created-by tokens, global search) are OR-ed
//! internally.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::criteria::{FilterCriteria, non_blank};
use crate::predicate::Predicate;

/// Row field names used by the overview screen
pub mod fields {
    pub const REQUEST_ID: &str = "requestId";
    pub const REQUEST_TYPE: &str = "requestType";
    pub const WORKFLOW_STATUS: &str = "workflowStatus";
    pub const CREATED_BY: &str = "createdBy";
    pub const CREATED_BY_NAME: &str = "createdByName";
    pub const CREATED_AT: &str = "createdAt";
}

/// Mapping from logical criteria to row field names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldNames {
    pub request_id: String,
    pub request_type: String,
    pub workflow_status: String,
    pub created_by: String,
    pub created_at: String,
}

impl FieldNames {
    /// Rows carrying the creator's email in `createdBy`
    pub fn created_by() -> Self {
        Self {
            request_id: fields::REQUEST_ID.to_string(),
            request_type: fields::REQUEST_TYPE.to_string(),
            workflow_status: fields::WORKFLOW_STATUS.to_string(),
            created_by: fields::CREATED_BY.to_string(),
            created_at: fields::CREATED_AT.to_string(),
        }
    }

    /// Rows carrying the creator's display name in `createdByName`
    pub fn created_by_name() -> Self {
        Self {
            created_by: fields::CREATED_BY_NAME.to_string(),
            ..Self::created_by()
        }
    }

    /// Fields covered by a global free-text search
    pub fn searchable(&self) -> [&str; 4] {
        [
            self.request_id.as_str(),
            self.request_type.as_str(),
            self.workflow_status.as_str(),
            self.created_by.as_str(),
        ]
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self::created_by()
    }
}

/// How the request-ID text box is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Contains-match on the request ID field only
    #[default]
    PerField,
    /// Free-text match across all searchable fields
    Global,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::PerField => write!(f, "per-field"),
            SearchMode::Global => write!(f, "global"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCompiler {
    fields: FieldNames,
    mode: SearchMode,
}

impl FilterCompiler {
    pub fn new(fields: FieldNames, mode: SearchMode) -> Self {
        Self { fields, mode }
    }

    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Compile criteria into a predicate. Never fails; absent criteria are
    /// omitted and empty criteria yield the identity filter.
    pub fn compile(&self, criteria: &FilterCriteria) -> Predicate {
        let fields = &self.fields;
        let mut clauses = Vec::new();

        if let Some(term) = non_blank(&criteria.global_search) {
            clauses.push(self.global_search(term));
        }

        if let Some(request_id) = non_blank(&criteria.request_id) {
            clauses.push(match self.mode {
                SearchMode::PerField => Predicate::contains(&fields.request_id, request_id),
                SearchMode::Global => self.global_search(request_id),
            });
        }

        if let Some(request_type) = non_blank(&criteria.request_type) {
            clauses.push(Predicate::equals(&fields.request_type, request_type));
        }

        if let Some(status) = non_blank(&criteria.workflow_status) {
            clauses.push(Predicate::equals(&fields.workflow_status, status));
        }

        let creators: Vec<Predicate> = criteria
            .created_by_names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| Predicate::contains(&fields.created_by, name))
            .collect();
        if !creators.is_empty() {
            clauses.push(Predicate::any(creators));
        }

        if let Some(range) = criteria.date_range {
            match range.bounds() {
                Some((start, end)) => {
                    if range.is_inverted() {
                        tracing::warn!(
                            start = %start,
                            end = %end,
                            "Date range ends before it starts; no row can match"
                        );
                    }
                    clauses.push(Predicate::between(&fields.created_at, start, end));
                }
                None if range.is_partial() => {
                    tracing::debug!(range = ?range, "Ignoring partial date range");
                }
                None => {}
            }
        }

        let predicate = Predicate::all(clauses);
        tracing::debug!(
            mode = %self.mode,
            leaves = predicate.leaf_count(),
            "Compiled filter criteria"
        );
        predicate
    }

    fn global_search(&self, term: &str) -> Predicate {
        Predicate::any(
            self.fields
                .searchable()
                .into_iter()
                .map(|field| Predicate::contains(field, term))
                .collect(),
        )
    }
}

/// Compile with the default field names and per-field search
pub fn compile(criteria: &FilterCriteria) -> Predicate {
    FilterCompiler::default().compile(criteria)
}
