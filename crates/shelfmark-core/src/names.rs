//! Actress-name tokens.
//!
//! Names are compared by their *token-set signature*: lower-cased,
//! whitespace-split tokens sorted lexically and re-joined with single
//! spaces. `"Jane Doe"`, `"doe  JANE"` and `"Doe Jane"` all share the
//! signature `"doe jane"`.

/// Order- and case-insensitive equality key for a name.
pub fn name_signature(name: &str) -> String {
    let mut tokens = query_tokens(name);
    tokens.sort();
    tokens.join(" ")
}

/// Lower-cased whitespace tokens of a query, in input order.
pub fn query_tokens(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Whether every token occurs in `name` as a case-insensitive substring.
///
/// `tokens` are expected to be lower-cased already (see [`query_tokens`]).
/// An empty token list matches every name.
pub fn contains_all_tokens(name: &str, tokens: &[String]) -> bool {
    let haystack = name.to_lowercase();
    tokens.iter().all(|token| haystack.contains(token.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_ignores_order_and_case() {
        assert_eq!(name_signature("Jane Doe"), "doe jane");
        assert_eq!(name_signature("Doe Jane"), "doe jane");
        assert_eq!(name_signature("  doe \t JANE "), "doe jane");
    }

    #[test]
    fn test_signature_distinguishes_different_names() {
        assert_ne!(name_signature("Jane Doe"), name_signature("Jane Roe"));
        assert_ne!(name_signature("Jane Doe"), name_signature("Jane"));
    }

    #[test]
    fn test_empty_name_signature() {
        assert_eq!(name_signature("   "), "");
    }

    #[test]
    fn test_query_tokens_lowercases() {
        assert_eq!(query_tokens(" Jane  DOE "), vec!["jane".to_string(), "doe".to_string()]);
    }

    #[test]
    fn test_contains_all_tokens_any_order() {
        let tokens = query_tokens("doe jan");
        assert!(contains_all_tokens("Jane Doe", &tokens));
        assert!(!contains_all_tokens("Jane Roe", &tokens));
    }

    #[test]
    fn test_contains_all_tokens_empty_matches_everything() {
        assert!(contains_all_tokens("Anyone", &[]));
    }
}
