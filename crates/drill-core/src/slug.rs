//! File naming for generated problems.

use chrono::{DateTime, Local};

/// Title used when the generated text has no markdown heading.
pub const UNTITLED: &str = "Untitled Problem";

/// Text of the first markdown heading line, without the `#` markers.
pub fn extract_title(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| line.starts_with('#'))
        .map(|line| line.trim_matches(|c: char| c == '#' || c.is_whitespace()).to_string())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Lowercase `title` and collapse every run of characters outside
/// `[a-z0-9]` into one hyphen, trimming hyphens at both ends.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        slugify(UNTITLED)
    } else {
        slug
    }
}

/// `YYYYMMDD_HHMMSS` for the given instant.
pub fn timestamp(at: DateTime<Local>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// `<slug>_<timestamp>.md`.
pub fn problem_filename(title: &str, timestamp: &str) -> String {
    format!("{}_{}.md", slugify(title), timestamp)
}

/// Title used for a continuation part's file name.
pub fn part_title(title: &str, part_number: u32) -> String {
    format!("{title}-part-{part_number}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn title_from_first_heading() {
        let text = "Intro line\n## Two Sum!! Variant\n### Examples\n";
        assert_eq!(extract_title(text), "Two Sum!! Variant");
    }

    #[test]
    fn title_fallback() {
        assert_eq!(extract_title("no heading here\njust text"), UNTITLED);
        assert_eq!(extract_title(""), UNTITLED);
    }

    #[test]
    fn indented_heading_counts() {
        assert_eq!(extract_title("   # Gesture Queue  "), "Gesture Queue");
    }

    #[test]
    fn slug_examples() {
        assert_eq!(slugify("Two Sum!! Variant"), "two-sum-variant");
        assert_eq!(slugify("## Two Sum!! Variant"), "two-sum-variant");
        assert_eq!(slugify("  --Layout   Engine 2--  "), "layout-engine-2");
        assert_eq!(slugify("Heap/Priority Queue"), "heap-priority-queue");
    }

    #[test]
    fn slug_is_idempotent() {
        for title in ["Two Sum!! Variant", "Dynamic Type: Scaling", "ÄÖÜ layout"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn slug_of_non_ascii_title_falls_back() {
        assert_eq!(slugify("日本語"), "untitled-problem");
        assert_eq!(slugify("!!!"), "untitled-problem");
        assert_eq!(slugify(UNTITLED), "untitled-problem");
    }

    #[test]
    fn filenames() {
        let at = Local.with_ymd_and_hms(2024, 10, 29, 9, 5, 7).unwrap();
        let ts = timestamp(at);
        assert_eq!(ts, "20241029_090507");
        assert_eq!(
            problem_filename("Swipe Gestures", &ts),
            "swipe-gestures_20241029_090507.md"
        );
        assert_eq!(
            problem_filename(&part_title("Swipe Gestures", 2), &ts),
            "swipe-gestures-part-2_20241029_090507.md"
        );
    }
}
