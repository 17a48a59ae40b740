use crate::domain::entities::record::Match;

pub const SEPARATOR_WIDTH: usize = 40;

pub fn format_match(m: &Match) -> String {
    format!(
        "   👉 Match ({:.2}): {}",
        m.score,
        m.text().unwrap_or("<no text>")
    )
}

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}
