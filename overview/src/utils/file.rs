//! File utility functions

use std::path::PathBuf;

/// Expand `~` and make relative paths absolute against the working directory.
///
/// ```text
/// expand_path("~/.costcenter")  // -> /home/user/.costcenter
/// expand_path("requests.json")  // -> /current/dir/requests.json
/// expand_path("/srv/export")    // -> /srv/export
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();

    let expanded = match path {
        "" => PathBuf::from("."),
        "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        _ => match (path.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(path),
        },
    };

    if expanded.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded))
            .unwrap_or(expanded)
    } else {
        expanded
    }
}
