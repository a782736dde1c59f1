//! String helpers

use unicode_segmentation::UnicodeSegmentation;

/// Split comma-separated entries, trimming whitespace and dropping empties and
/// repeats while keeping first-seen order
pub fn split_comma_list<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for item in items {
        for part in item.as_ref().split(',') {
            let part = part.trim();
            if !part.is_empty() && !result.iter().any(|existing| existing == part) {
                result.push(part.to_string());
            }
        }
    }
    result
}

/// Truncate to at most `width` user-perceived characters
pub fn truncate_graphemes(s: &str, width: usize) -> String {
    s.graphemes(true).take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_comma_list() {
        let items = vec!["square, labels", "pricebook,,square", " "];
        assert_eq!(split_comma_list(&items), vec!["square", "labels", "pricebook"]);
    }

    #[test]
    fn test_truncate_graphemes_keeps_combined_characters() {
        assert_eq!(truncate_graphemes("Crème brûlée", 5), "Crème");
        assert_eq!(truncate_graphemes("abc", 10), "abc");
    }
}
