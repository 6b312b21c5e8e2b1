use clap::{Args, Parser, Subcommand};

use std::path::PathBuf;

use costcenter::SearchMode;

use super::config::CreatedByField;
use super::constants::{
    ENV_CONFIG, ENV_CREATED_BY_FIELD, ENV_DATA, ENV_EXPORT_DIR, ENV_EXPORT_FILE_NAME,
    ENV_SEARCH_MODE, ENV_USER,
};
use crate::utils::string::parse_string_array;
use crate::utils::time::parse_date_arg;

#[derive(Parser)]
#[command(name = "costcenter")]
#[command(version, about = "Cost Center request overview", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Request snapshot file (JSON array of request rows)
    #[arg(long, short = 'd', global = true, env = ENV_DATA)]
    pub data: Option<PathBuf>,

    /// Row field holding the creator (createdBy or createdByName)
    #[arg(long, global = true, env = ENV_CREATED_BY_FIELD, value_parser = parse_created_by_field)]
    pub created_by_field: Option<CreatedByField>,

    /// How the request ID box is interpreted (per-field or global)
    #[arg(long, global = true, env = ENV_SEARCH_MODE, value_parser = parse_search_mode)]
    pub search_mode: Option<SearchMode>,

    /// Current user's email, added as the default created-by token
    #[arg(long, short = 'u', global = true, env = ENV_USER)]
    pub user: Option<String>,

    /// Directory the spreadsheet is written to
    #[arg(long, global = true, env = ENV_EXPORT_DIR)]
    pub export_dir: Option<PathBuf>,

    /// Spreadsheet file name
    #[arg(long, global = true, env = ENV_EXPORT_FILE_NAME)]
    pub export_file_name: Option<String>,
}

/// Parse creator field from CLI/env string
fn parse_created_by_field(s: &str) -> Result<CreatedByField, String> {
    match s.to_lowercase().as_str() {
        "createdby" | "created-by" => Ok(CreatedByField::CreatedBy),
        "createdbyname" | "created-by-name" => Ok(CreatedByField::CreatedByName),
        _ => Err(format!(
            "Invalid created-by field '{}'. Valid options: createdBy, createdByName",
            s
        )),
    }
}

/// Parse search mode from CLI/env string
fn parse_search_mode(s: &str) -> Result<SearchMode, String> {
    match s.to_lowercase().as_str() {
        "per-field" | "field" => Ok(SearchMode::PerField),
        "global" => Ok(SearchMode::Global),
        _ => Err(format!(
            "Invalid search mode '{}'. Valid options: per-field, global",
            s
        )),
    }
}

/// Filter bar inputs
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Request ID (substring, or free text in global search mode)
    #[arg(long)]
    pub request_id: Option<String>,

    /// Request type key (exact)
    #[arg(long)]
    pub request_type: Option<String>,

    /// Workflow status key (exact)
    #[arg(long)]
    pub workflow_status: Option<String>,

    /// Created-by tokens (repeatable, or comma-separated)
    #[arg(long = "created-by", value_name = "NAME")]
    pub created_by: Vec<String>,

    /// Created-by tokens to drop (repeatable, or comma-separated)
    #[arg(long = "exclude-created-by", value_name = "NAME")]
    pub exclude_created_by: Vec<String>,

    /// Start from an empty filter bar instead of the current user's token
    #[arg(long)]
    pub no_current_user: bool,

    /// Creation date range start (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<chrono::DateTime<chrono::Utc>>,

    /// Creation date range end (YYYY-MM-DD or RFC 3339). A bare date means
    /// midnight at the start of that day, so requests created later that day
    /// are not included.
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<chrono::DateTime<chrono::Utc>>,

    /// Free text matched against ID, type, status and creator
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Created-by tokens with comma-separated values expanded
    pub fn created_by_tokens(&self) -> Vec<String> {
        split_tokens(&self.created_by)
    }

    pub fn excluded_tokens(&self) -> Vec<String> {
        split_tokens(&self.exclude_created_by)
    }
}

fn split_tokens(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(String::as_str)
        .flat_map(parse_string_array)
        .collect()
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Filter requests and print the matching rows (default command)
    Search {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the compiled filter predicate as JSON
    Predicate {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Filter requests and export the matching rows to a spreadsheet
    Export {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show a single request by ID
    Show {
        /// Request ID
        request_id: String,
    },
    /// Start a new cost center request
    Create,
    /// Change or extend an existing cost center
    Change,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Search {
            filter: FilterArgs::default(),
            json: false,
        }
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub created_by_field: Option<CreatedByField>,
    pub search_mode: Option<SearchMode>,
    pub user: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub export_file_name: Option<String>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    let config = CliConfig {
        config: cli.config,
        data: cli.data,
        created_by_field: cli.created_by_field,
        search_mode: cli.search_mode,
        user: cli.user,
        export_dir: cli.export_dir,
        export_file_name: cli.export_file_name,
    };
    (config, cli.command.unwrap_or_default())
}
