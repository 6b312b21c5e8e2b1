//! Terminal utility functions

use std::path::Path;

/// Format a file path as a clickable terminal hyperlink if supported.
///
/// Uses OSC 8 escape sequences where the terminal understands them and
/// falls back to plain colored text otherwise.
pub fn file_link(path: &Path) -> String {
    let display = path.display();
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        format!(
            "\x1b]8;;file://{}\x07\x1b[36m{}\x1b[0m\x1b]8;;\x07",
            display, display
        )
    } else {
        format!("\x1b[36m{}\x1b[0m", display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_link_contains_path() {
        let path = Path::new("/tmp/CostCenterRequests.xlsx");
        let result = file_link(path);

        assert!(result.contains("/tmp/CostCenterRequests.xlsx"));
        assert!(result.contains("\x1b[36m"));
        assert!(result.ends_with("\x1b[0m") || result.ends_with("\x1b]8;;\x07"));
    }

    #[test]
    fn test_file_link_hyperlink_format() {
        let path = Path::new("/tmp/out.xlsx");
        let result = file_link(path);

        if result.contains("\x1b]8;;") {
            assert!(result.contains("\x1b]8;;file:///tmp/out.xlsx\x07"));
        }
    }
}
