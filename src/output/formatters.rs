//! Formatting utilities for terminal output

/// Format elapsed seconds as `MM:SS`
///
/// Minutes are padded to two digits and keep growing past 99.
///
/// # Examples
/// ```
/// use memory_match::output::formatters::format_clock;
///
/// assert_eq!(format_clock(0), "00:00");
/// assert_eq!(format_clock(75), "01:15");
/// ```
#[must_use]
pub fn format_clock(seconds: u64) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{mins:02}:{secs:02}")
}

/// Columns for a near-square card grid
#[must_use]
pub fn grid_columns(card_count: usize) -> usize {
    if card_count == 0 {
        return 1;
    }
    (card_count as f64).sqrt().ceil() as usize
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
