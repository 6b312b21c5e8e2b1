//! Cost Center request overview
//!
//! Owns the loaded rows, the filter form and the currently bound (visible)
//! subset. Screen actions map onto methods: Go, Clear, row press, selection,
//! the two button presses and export.

use std::path::PathBuf;

use costcenter::{
    ColumnSpec, ExportError, FilterCompiler, Predicate, Row, SpreadsheetBuilder, export_rows,
    matches, overview_columns,
};

use super::form::FilterForm;
use super::message::Message;
use crate::core::constants::{MSG_CHANGE_EXTEND, MSG_CREATE};

pub struct Overview {
    compiler: FilterCompiler,
    columns: Vec<ColumnSpec>,
    rows: Vec<Row>,
    /// Indexes into `rows` currently bound to the table
    visible: Vec<usize>,
    form: FilterForm,
}

impl Overview {
    /// Rows start unfiltered; the form starts with the current user's token.
    pub fn new(rows: Vec<Row>, compiler: FilterCompiler, current_user: Option<&str>) -> Self {
        let columns = overview_columns(compiler.fields());
        let visible = (0..rows.len()).collect();
        Self {
            compiler,
            columns,
            rows,
            visible,
            form: FilterForm::for_user(current_user),
        }
    }

    pub fn form(&self) -> &FilterForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FilterForm {
        &mut self.form
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Predicate the form would compile to right now
    pub fn predicate(&self) -> Predicate {
        self.compiler.compile(&self.form.criteria())
    }

    /// Apply the filter form to the table binding. Returns the match count.
    pub fn go(&mut self) -> usize {
        let predicate = self.predicate();
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| matches(row, &predicate))
            .map(|(index, _)| index)
            .collect();

        tracing::debug!(
            total = self.rows.len(),
            visible = self.visible.len(),
            "Applied filter"
        );
        self.visible.len()
    }

    /// Clear the filter bar. The table keeps its current binding until the
    /// next Go.
    pub fn clear(&mut self) {
        self.form.clear();
    }

    pub fn visible_rows(&self) -> Vec<&Row> {
        self.visible.iter().map(|&index| &self.rows[index]).collect()
    }

    /// Position of a request in the visible table
    pub fn find(&self, request_id: &str) -> Option<usize> {
        let field = &self.compiler.fields().request_id;
        self.visible_rows()
            .iter()
            .position(|row| row.text(field).is_some_and(|id| id == request_id))
    }

    /// Row press: report the pressed request's ID
    pub fn request_press(&self, request_id: &str) -> Message {
        let found = self
            .find(request_id)
            .and_then(|i| self.visible.get(i))
            .map(|&i| &self.rows[i]);
        match found {
            Some(row) => {
                let id = row
                    .text(&self.compiler.fields().request_id)
                    .unwrap_or_default();
                Message::Information(format!("Request ID: {}", id))
            }
            None => Message::Warning(format!("Request {} not found.", request_id)),
        }
    }

    /// Selection change on the visible table. `None` (deselect) is a no-op.
    pub fn select(&self, index: Option<usize>) -> Option<&Row> {
        let row = index
            .and_then(|i| self.visible.get(i))
            .map(|&i| &self.rows[i])?;
        tracing::info!(
            request_id = %row.text(&self.compiler.fields().request_id).unwrap_or_default(),
            "Selected request"
        );
        Some(row)
    }

    pub fn create_press(&self) -> Message {
        Message::Information(MSG_CREATE.to_string())
    }

    pub fn change_extend_press(&self) -> Message {
        Message::Information(MSG_CHANGE_EXTEND.to_string())
    }

    /// Export the visible rows. An empty table yields
    /// [`ExportError::NoData`] without acquiring a builder.
    pub fn export<B, F>(&self, file_name: &str, acquire: F) -> Result<PathBuf, ExportError>
    where
        B: SpreadsheetBuilder,
        F: FnOnce() -> Result<B, ExportError>,
    {
        export_rows(&self.visible_rows(), &self.columns, file_name, acquire)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use chrono::{TimeZone, Utc};
    use costcenter::{DEFAULT_FILE_NAME, DateRange, ExportSettings, FieldNames, SearchMode};

    fn rows() -> Vec<Row> {
        let json = serde_json::json!([
            {
                "requestId": "REQ-1",
                "requestType": "CREATE",
                "workflowStatus": "OPEN",
                "createdBy": "alice.smith@x.com",
                "createdByName": "Alice Smith",
                "createdAt": "2024-03-01T08:00:00Z"
            },
            {
                "requestId": "REQ-2",
                "requestType": "CHANGE",
                "workflowStatus": "APPROVED",
                "createdBy": "carol@x.com",
                "createdByName": "Carol Jones",
                "createdAt": "2024-03-10T08:00:00Z"
            },
            {
                "requestId": "REQ-3",
                "requestType": "CREATE",
                "workflowStatus": "REJECTED",
                "createdBy": "bob@x.com",
                "createdByName": "Bob Brown",
                "createdAt": "2024-03-20T08:00:00Z"
            }
        ]);
        serde_json::from_value(json).unwrap()
    }

    fn overview(current_user: Option<&str>) -> Overview {
        Overview::new(rows(), FilterCompiler::default(), current_user)
    }

    fn visible_ids(overview: &Overview) -> Vec<String> {
        overview
            .visible_rows()
            .iter()
            .map(|r| r.text("requestId").unwrap().into_owned())
            .collect()
    }

    struct CountingBuilder {
        destroyed: Rc<Cell<usize>>,
    }

    impl SpreadsheetBuilder for CountingBuilder {
        fn build(&mut self, settings: &ExportSettings) -> Result<PathBuf, ExportError> {
            Ok(PathBuf::from(&settings.file_name))
        }

        fn destroy(&mut self) {
            self.destroyed.set(self.destroyed.get() + 1);
        }
    }

    #[test]
    fn test_rows_start_unfiltered() {
        let overview = overview(Some("alice"));
        assert_eq!(visible_ids(&overview), vec!["REQ-1", "REQ-2", "REQ-3"]);
    }

    #[test]
    fn test_go_applies_current_user_token() {
        let mut overview = overview(Some("alice"));
        assert_eq!(overview.go(), 1);
        assert_eq!(visible_ids(&overview), vec!["REQ-1"]);
    }

    #[test]
    fn test_go_with_type_and_status() {
        let mut overview = overview(None);
        overview.form_mut().set_request_type("CREATE");
        overview.go();
        assert_eq!(visible_ids(&overview), vec!["REQ-1", "REQ-3"]);

        overview.form_mut().set_workflow_status("REJECTED");
        overview.go();
        assert_eq!(visible_ids(&overview), vec!["REQ-3"]);
    }

    #[test]
    fn test_go_with_date_range() {
        let mut overview = overview(None);
        overview.form_mut().set_date_range(DateRange::new(
            Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap(),
        ));
        overview.go();
        assert_eq!(visible_ids(&overview), vec!["REQ-2", "REQ-3"]);
    }

    #[test]
    fn test_clear_then_go_shows_everything() {
        let mut overview = overview(Some("alice"));
        overview.go();
        overview.clear();
        assert_eq!(visible_ids(&overview), vec!["REQ-1"]);

        overview.go();
        assert_eq!(visible_ids(&overview).len(), 3);
    }

    #[test]
    fn test_created_by_name_with_global_search() {
        let compiler = FilterCompiler::new(FieldNames::created_by_name(), SearchMode::Global);
        let mut overview = Overview::new(rows(), compiler, None);

        overview.form_mut().set_request_id("brown");
        overview.go();
        assert_eq!(visible_ids(&overview), vec!["REQ-3"]);
        assert_eq!(overview.columns()[4].field, "createdByName");
    }

    #[test]
    fn test_request_press() {
        let overview = overview(None);
        assert_eq!(
            overview.request_press("REQ-2"),
            Message::Information("Request ID: REQ-2".to_string())
        );
        assert!(matches!(
            overview.request_press("REQ-9"),
            Message::Warning(_)
        ));
    }

    #[test]
    fn test_request_press_only_sees_visible_rows() {
        let mut overview = overview(Some("alice"));
        overview.go();
        assert!(matches!(
            overview.request_press("REQ-2"),
            Message::Warning(_)
        ));
    }

    #[test]
    fn test_find_uses_visible_positions() {
        let mut overview = overview(None);
        assert_eq!(overview.find("REQ-3"), Some(2));

        overview.form_mut().set_request_type("CREATE");
        overview.go();
        assert_eq!(overview.find("REQ-3"), Some(1));
        assert_eq!(overview.find("REQ-2"), None);
    }

    #[test]
    fn test_select() {
        let mut overview = overview(None);
        overview.form_mut().set_request_type("CHANGE");
        overview.go();

        let row = overview.select(Some(0)).unwrap();
        assert_eq!(row.text("requestId").as_deref(), Some("REQ-2"));
        assert!(overview.select(Some(1)).is_none());
        assert!(overview.select(None).is_none());
    }

    #[test]
    fn test_button_messages() {
        let overview = overview(None);
        assert_eq!(overview.create_press().text(), "Create Cost Center triggered.");
        assert_eq!(
            overview.change_extend_press().text(),
            "Change/Extend Cost Center triggered."
        );
    }

    #[test]
    fn test_export_without_matches_is_no_data() {
        let mut overview = overview(None);
        overview.form_mut().set_request_type("DELETE");
        assert_eq!(overview.go(), 0);

        let destroyed = Rc::new(Cell::new(0));
        let result = overview.export(DEFAULT_FILE_NAME, || {
            Ok(CountingBuilder {
                destroyed: Rc::clone(&destroyed),
            })
        });

        assert!(matches!(result, Err(ExportError::NoData)));
        assert_eq!(destroyed.get(), 0);
    }

    #[test]
    fn test_export_visible_rows() {
        let mut overview = overview(Some("bob"));
        overview.go();

        let destroyed = Rc::new(Cell::new(0));
        let path = overview
            .export(DEFAULT_FILE_NAME, || {
                Ok(CountingBuilder {
                    destroyed: Rc::clone(&destroyed),
                })
            })
            .unwrap();

        assert_eq!(path, PathBuf::from("CostCenterRequests.xlsx"));
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn test_predicate_reflects_form() {
        let mut overview = overview(None);
        assert!(overview.predicate().is_identity());
        overview.form_mut().set_request_type("CREATE");
        assert_eq!(
            overview.predicate(),
            Predicate::all(vec![Predicate::equals("requestType", "CREATE")])
        );
    }
}
