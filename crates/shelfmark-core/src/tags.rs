//! Tag normalization and merging.
//!
//! Tags arrive from the API as free text. Before they reach storage they are
//! trimmed, emptied entries are dropped, and duplicates are collapsed while
//! keeping the first spelling in its original position.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// How tag duplicates are detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCasePolicy {
    /// `"Foo"` and `"foo"` are the same tag; the first spelling is kept.
    #[default]
    Insensitive,
    /// `"Foo"` and `"foo"` are different tags.
    Sensitive,
}

impl TagCasePolicy {
    fn key(self, tag: &str) -> String {
        match self {
            TagCasePolicy::Insensitive => tag.to_lowercase(),
            TagCasePolicy::Sensitive => tag.to_string(),
        }
    }
}

impl std::fmt::Display for TagCasePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagCasePolicy::Insensitive => write!(f, "insensitive"),
            TagCasePolicy::Sensitive => write!(f, "sensitive"),
        }
    }
}

impl std::str::FromStr for TagCasePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insensitive" => Ok(TagCasePolicy::Insensitive),
            "sensitive" => Ok(TagCasePolicy::Sensitive),
            other => Err(format!(
                "Invalid tag case policy '{}': expected 'sensitive' or 'insensitive'",
                other
            )),
        }
    }
}

/// Trim, drop empty entries, and dedupe, preserving first occurrence order.
pub fn normalize_tags(raw: &[String], policy: TagCasePolicy) -> Vec<String> {
    merge_tags(&[], raw, policy)
}

/// Union of `existing` and `incoming`: existing tags keep their order, new
/// ones are appended; nothing is duplicated and nothing empty survives.
pub fn merge_tags(existing: &[String], incoming: &[String], policy: TagCasePolicy) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(existing.len() + incoming.len());

    for tag in existing.iter().chain(incoming) {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if seen.insert(policy.key(tag)) {
            merged.push(tag.to_string());
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_drops_blank_and_duplicates() {
        let tags = normalize_tags(&strings(&["a", "a", "b"]), TagCasePolicy::Sensitive);
        assert_eq!(tags, strings(&["a", "b"]));
    }

    #[test]
    fn test_normalize_trims_entries() {
        let tags = normalize_tags(&strings(&["  rust ", "", "\t", "rust"]), TagCasePolicy::Sensitive);
        assert_eq!(tags, strings(&["rust"]));
    }

    #[test]
    fn test_case_insensitive_keeps_first_spelling() {
        let tags = normalize_tags(&strings(&["  ", "Foo", "foo"]), TagCasePolicy::Insensitive);
        assert_eq!(tags, strings(&["Foo"]));
    }

    #[test]
    fn test_case_sensitive_keeps_both_spellings() {
        let tags = normalize_tags(&strings(&["  ", "Foo", "foo"]), TagCasePolicy::Sensitive);
        assert_eq!(tags, strings(&["Foo", "foo"]));
    }

    #[test]
    fn test_merge_is_union_preserving_existing_order() {
        let merged = merge_tags(
            &strings(&["b", "a"]),
            &strings(&["c", "a", "d"]),
            TagCasePolicy::Sensitive,
        );
        assert_eq!(merged, strings(&["b", "a", "c", "d"]));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let incoming = strings(&["  ", "Foo", "foo"]);
        let once = merge_tags(&[], &incoming, TagCasePolicy::Insensitive);
        let twice = merge_tags(&once, &incoming, TagCasePolicy::Insensitive);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_case_insensitive_against_existing() {
        let merged = merge_tags(&strings(&["Rust"]), &strings(&["rust", "RUST"]), TagCasePolicy::Insensitive);
        assert_eq!(merged, strings(&["Rust"]));
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!("Sensitive".parse::<TagCasePolicy>().unwrap(), TagCasePolicy::Sensitive);
        assert_eq!(" insensitive ".parse::<TagCasePolicy>().unwrap(), TagCasePolicy::Insensitive);
        assert!("upper".parse::<TagCasePolicy>().is_err());
        assert_eq!(TagCasePolicy::Sensitive.to_string(), "sensitive");
    }
}
