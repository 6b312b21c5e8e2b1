//! Filter bar state
//!
//! Holds what the user has typed into the filter bar between searches.
//! [`FilterForm::criteria`] takes the snapshot that the compiler consumes.

use costcenter::{DateRange, FilterCriteria};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    request_id: String,
    request_type: String,
    workflow_status: String,
    created_by_tokens: Vec<String>,
    date_range: DateRange,
    global_search: String,
}

impl FilterForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form as first shown: the current user pre-filled as a created-by token
    pub fn for_user(current_user: Option<&str>) -> Self {
        let mut form = Self::new();
        if let Some(user) = current_user {
            form.add_token(user);
        }
        form
    }

    pub fn set_request_id(&mut self, value: impl Into<String>) {
        self.request_id = value.into();
    }

    pub fn set_request_type(&mut self, key: impl Into<String>) {
        self.request_type = key.into();
    }

    pub fn set_workflow_status(&mut self, key: impl Into<String>) {
        self.workflow_status = key.into();
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.date_range = range;
    }

    pub fn set_global_search(&mut self, text: impl Into<String>) {
        self.global_search = text.into();
    }

    /// Add a created-by token. Returns false for blanks and duplicates.
    pub fn add_token(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.created_by_tokens.iter().any(|t| t == text) {
            return false;
        }
        self.created_by_tokens.push(text.to_string());
        true
    }

    pub fn remove_token(&mut self, text: &str) -> bool {
        let before = self.created_by_tokens.len();
        self.created_by_tokens.retain(|t| t != text.trim());
        self.created_by_tokens.len() != before
    }

    pub fn tokens(&self) -> &[String] {
        &self.created_by_tokens
    }

    /// Reset every input, including tokens and the date range
    pub fn clear(&mut self) {
        *self = Self::default();
        tracing::debug!("Filter form cleared");
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_request_id(&self.request_id)
            .with_request_type(&self.request_type)
            .with_workflow_status(&self.workflow_status)
            .with_created_by_names(&self.created_by_tokens)
            .with_date_range(self.date_range)
            .with_global_search(&self.global_search)
    }
}
