// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Cost Center Overview";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "costcenter";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".costcenter";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "costcenter.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "COSTCENTER_CONFIG";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "COSTCENTER_LOG";

// =============================================================================
// Environment Variables - Data
// =============================================================================

/// Environment variable for the request snapshot file
pub const ENV_DATA: &str = "COSTCENTER_DATA";

/// Default request snapshot file (relative to the working directory)
pub const DEFAULT_SNAPSHOT_FILE: &str = "requests.json";

/// Maximum snapshot size in bytes (64MB)
pub const MAX_SNAPSHOT_BYTES: u64 = 64 * 1024 * 1024;

// =============================================================================
// Environment Variables - Filter
// =============================================================================

/// Environment variable selecting the creator field (createdBy or createdByName)
pub const ENV_CREATED_BY_FIELD: &str = "COSTCENTER_CREATED_BY_FIELD";

/// Environment variable selecting the search mode (per-field or global)
pub const ENV_SEARCH_MODE: &str = "COSTCENTER_SEARCH_MODE";

/// Environment variable for the current user's email (default created-by token)
pub const ENV_USER: &str = "COSTCENTER_USER";

// =============================================================================
// Environment Variables - Export
// =============================================================================

/// Environment variable for the export output directory
pub const ENV_EXPORT_DIR: &str = "COSTCENTER_EXPORT_DIR";

/// Environment variable for the export file name
pub const ENV_EXPORT_FILE_NAME: &str = "COSTCENTER_EXPORT_FILE_NAME";

/// Required export file extension
pub const EXPORT_EXTENSION: &str = "xlsx";

/// Worksheet name inside the exported workbook
pub const EXPORT_SHEET_NAME: &str = "Requests";

// =============================================================================
// Messages
// =============================================================================

pub const MSG_CREATE: &str = "Create Cost Center triggered.";

pub const MSG_CHANGE_EXTEND: &str = "Change/Extend Cost Center triggered.";
