/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

pub fn check_mark(done: bool) -> &'static str {
    if done { "●" } else { "○" }
}

/// "42/105"
pub fn score_fraction(score: u32, target: u32) -> String {
    format!("{}/{}", score, target)
}
