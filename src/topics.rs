//! Topic-set arithmetic over ordered lists of topic strings.
//!
//! Topics are opaque, case-sensitive strings; no normalization happens
//! here.

use std::collections::HashSet;

/// Remove duplicate topics, keeping only the first occurrence of each
/// distinct value. Relative order of surviving elements is preserved.
pub fn dedup(topics: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();

    topics
        .iter()
        .filter(|topic| seen.insert(topic.as_str()))
        .cloned()
        .collect()
}

/// The elements of `topics` that do not appear in `remove`. Input order
/// is preserved.
pub fn difference(topics: &[String], remove: &[String]) -> Vec<String> {
    let remove = remove.iter().map(String::as_str).collect::<HashSet<_>>();

    topics
        .iter()
        .filter(|topic| !remove.contains(topic.as_str()))
        .cloned()
        .collect()
}

/// Comma-separated display string; empty input yields an empty string.
pub fn join(topics: &[String]) -> String {
    topics.join(",")
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn strings(topics: &[&str]) -> Vec<String> {
        topics.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_dedup() {
        assert_eq!(
            dedup(&strings(&["this", "this", "is", "a", "a", "test"])),
            strings(&["this", "is", "a", "test"])
        );
        assert_eq!(dedup(&[]), Vec::<String>::new());
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let deduped = dedup(&strings(&["b", "a", "b", "c", "a"]));
        assert_eq!(dedup(&deduped), deduped);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        assert_eq!(
            dedup(&strings(&["Rust", "rust", "Rust"])),
            strings(&["Rust", "rust"])
        );
    }

    #[test]
    fn test_difference() {
        let result = difference(
            &strings(&["this", "is", "a", "test"]),
            &strings(&["this", "a"]),
        );
        assert_eq!(result, strings(&["is", "test"]));

        for removed in ["this", "a"] {
            assert!(!result.iter().any(|t| t == removed));
        }
    }

    #[test]
    fn test_difference_of_nothing() {
        let topics = strings(&["this", "is", "a", "test"]);
        assert_eq!(difference(&topics, &[]), topics);
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&strings(&["this", "is", "a", "test"])), "this,is,a,test");
        assert_eq!(join(&[]), "");
    }
}
