//! Request snapshot loading
//!
//! The overview table is fed from a JSON document exported by the request
//! service. Three shapes are accepted:
//! - a bare array of rows: `[{...}, ...]`
//! - OData v4 collections: `{"value": [...]}`
//! - OData v2 verbose collections: `{"d": {"results": [...]}}`

use std::io::ErrorKind;
use std::path::Path;

use costcenter::Row;
use serde::Deserialize;
use tokio::fs;

use super::error::SnapshotError;
use crate::core::constants::MAX_SNAPSHOT_BYTES;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Rows(Vec<Row>),
    Collection { value: Vec<Row> },
    Verbose { d: VerboseCollection },
}

#[derive(Deserialize)]
struct VerboseCollection {
    results: Vec<Row>,
}

impl SnapshotDocument {
    fn into_rows(self) -> Vec<Row> {
        match self {
            SnapshotDocument::Rows(rows) => rows,
            SnapshotDocument::Collection { value } => value,
            SnapshotDocument::Verbose { d } => d.results,
        }
    }
}

/// Parse rows from snapshot JSON
pub fn parse_rows(content: &str) -> Result<Vec<Row>, SnapshotError> {
    let doc: SnapshotDocument = serde_json::from_str(content)?;
    Ok(doc.into_rows())
}

/// Load rows from a snapshot file
pub async fn load_rows(path: &Path) -> Result<Vec<Row>, SnapshotError> {
    let metadata = fs::metadata(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => SnapshotError::NotFound(path.to_path_buf()),
        _ => SnapshotError::Io(e),
    })?;

    if metadata.len() > MAX_SNAPSHOT_BYTES {
        return Err(SnapshotError::TooLarge {
            size: metadata.len(),
            max: MAX_SNAPSHOT_BYTES,
        });
    }

    let content = fs::read_to_string(path).await?;
    let rows = parse_rows(&content)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Loaded request snapshot");
    Ok(rows)
}
