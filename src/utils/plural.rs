//! Count-with-noun formatting for log lines.

/// `plural_count(1, "page")` is `"1 page"`, `plural_count(3, "page")` is `"3 pages"`.
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "image"), "0 images");
        assert_eq!(plural_count(1, "image"), "1 image");
        assert_eq!(plural_count(2, "page"), "2 pages");
    }
}
