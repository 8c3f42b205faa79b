//! UI utilities for consistent terminal output formatting.

/// Width of error box separators.
const ERROR_BOX_WIDTH: usize = 60;

/// Print an error box with a title and optional detail lines.
///
/// Formats fatal errors consistently:
/// - A separator line of `=` characters
/// - The error title
/// - Another separator line
/// - Optional detail content
pub fn print_error_box(title: &str, detail: Option<&str>) {
    eprintln!("\n{}", "=".repeat(ERROR_BOX_WIDTH));
    eprintln!("{title}");
    eprintln!("{}", "=".repeat(ERROR_BOX_WIDTH));

    if let Some(detail) = detail
        && !detail.is_empty()
    {
        eprintln!("\n{detail}");
    }
}
