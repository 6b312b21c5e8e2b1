use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use costcenter::{DEFAULT_FILE_NAME, FieldNames, SearchMode};
use serde::{Deserialize, Serialize};

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_SNAPSHOT_FILE, EXPORT_EXTENSION};

// =============================================================================
// Creator Field Enum
// =============================================================================

/// Row field the overview reads the request creator from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum CreatedByField {
    /// Creator email (`createdBy`)
    #[default]
    #[serde(rename = "createdBy")]
    CreatedBy,
    /// Creator display name (`createdByName`)
    #[serde(rename = "createdByName")]
    CreatedByName,
}

impl CreatedByField {
    pub fn field_names(&self) -> FieldNames {
        match self {
            CreatedByField::CreatedBy => FieldNames::created_by(),
            CreatedByField::CreatedByName => FieldNames::created_by_name(),
        }
    }
}

impl fmt::Display for CreatedByField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreatedByField::CreatedBy => write!(f, "createdBy"),
            CreatedByField::CreatedByName => write!(f, "createdByName"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Data source section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DataFileConfig {
    pub snapshot: Option<PathBuf>,
}

/// Filter section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FilterFileConfig {
    pub created_by_field: Option<CreatedByField>,
    pub search_mode: Option<SearchMode>,
}

/// Export section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExportFileConfig {
    pub output_dir: Option<PathBuf>,
    pub file_name: Option<String>,
}

/// Current user section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct UserFileConfig {
    pub email: Option<String>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub data: Option<DataFileConfig>,
    pub filter: Option<FilterFileConfig>,
    pub export: Option<ExportFileConfig>,
    pub user: Option<UserFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(data) = other.data {
            let current = self.data.get_or_insert_with(DataFileConfig::default);
            if data.snapshot.is_some() {
                tracing::trace!(snapshot = ?data.snapshot, "Merging data.snapshot");
                current.snapshot = data.snapshot;
            }
        }

        if let Some(filter) = other.filter {
            let current = self.filter.get_or_insert_with(FilterFileConfig::default);
            if filter.created_by_field.is_some() {
                tracing::trace!(field = ?filter.created_by_field, "Merging filter.created_by_field");
                current.created_by_field = filter.created_by_field;
            }
            if filter.search_mode.is_some() {
                tracing::trace!(mode = ?filter.search_mode, "Merging filter.search_mode");
                current.search_mode = filter.search_mode;
            }
        }

        if let Some(export) = other.export {
            let current = self.export.get_or_insert_with(ExportFileConfig::default);
            if export.output_dir.is_some() {
                tracing::trace!(dir = ?export.output_dir, "Merging export.output_dir");
                current.output_dir = export.output_dir;
            }
            if export.file_name.is_some() {
                tracing::trace!(name = ?export.file_name, "Merging export.file_name");
                current.file_name = export.file_name;
            }
        }

        if let Some(user) = other.user {
            let current = self.user.get_or_insert_with(UserFileConfig::default);
            if user.email.is_some() {
                tracing::trace!(email = ?user.email, "Merging user.email");
                current.email = user.email;
            }
        }
    }
}

// =============================================================================
// Resolved Config Structs
// =============================================================================

#[derive(Debug, Clone)]
pub struct DataConfig {
    pub snapshot: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub created_by_field: CreatedByField,
    pub search_mode: SearchMode,
}

impl FilterConfig {
    pub fn field_names(&self) -> FieldNames {
        self.created_by_field.field_names()
    }
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub file_name: String,
}

impl ExportConfig {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserConfig {
    pub email: Option<String>,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data: DataConfig,
    pub filter: FilterConfig,
    pub export: ExportConfig,
    pub user: UserConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.costcenter/costcenter.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let config = Self::resolve(cli, file_config);
        config.validate()?;
        tracing::debug!(config = ?config, "Configuration resolved");
        Ok(config)
    }

    /// Layer configs: defaults -> file config -> CLI/env overrides
    fn resolve(cli: &CliConfig, file_config: FileConfig) -> Self {
        let file_data = file_config.data.unwrap_or_default();
        let file_filter = file_config.filter.unwrap_or_default();
        let file_export = file_config.export.unwrap_or_default();
        let file_user = file_config.user.unwrap_or_default();

        let snapshot = cli
            .data
            .clone()
            .or(file_data.snapshot)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_FILE));

        let filter = FilterConfig {
            created_by_field: cli
                .created_by_field
                .or(file_filter.created_by_field)
                .unwrap_or_default(),
            search_mode: cli
                .search_mode
                .or(file_filter.search_mode)
                .unwrap_or_default(),
        };

        let export = ExportConfig {
            output_dir: cli
                .export_dir
                .clone()
                .or(file_export.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            file_name: cli
                .export_file_name
                .clone()
                .or(file_export.file_name)
                .map(|name| name.trim().to_string())
                .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
        };

        // Blank email means "no current user"
        let email = cli
            .user
            .clone()
            .or(file_user.email)
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        Self {
            data: DataConfig {
                snapshot: expand_path(&snapshot.to_string_lossy()),
            },
            filter,
            export: ExportConfig {
                output_dir: expand_path(&export.output_dir.to_string_lossy()),
                ..export
            },
            user: UserConfig { email },
        }
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        let file_name = self.export.file_name.as_str();
        if file_name.is_empty() {
            anyhow::bail!("Configuration error: export.file_name must not be empty");
        }

        if file_name.contains(['/', '\\']) {
            anyhow::bail!(
                "Configuration error: export.file_name must be a file name, not a path ({})",
                file_name
            );
        }

        let has_extension = Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(EXPORT_EXTENSION));
        if !has_extension {
            anyhow::bail!(
                "Configuration error: export.file_name must end in .{} ({})",
                EXPORT_EXTENSION,
                file_name
            );
        }

        Ok(())
    }
}

/// Get the profile config path (~/.costcenter/costcenter.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
