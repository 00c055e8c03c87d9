//! Keyword rule tables.
//!
//! A rule fires when the lowercased input contains any of its keywords.
//! Tables are plain ordered slices so priority is visible at the definition
//! site.

/// Substring keywords mapped to a value
#[derive(Debug, Clone)]
pub struct KeywordRule<T: 'static> {
    pub keywords: &'static [&'static str],
    pub value: T,
}

impl<T> KeywordRule<T> {
    /// `lower` must already be lowercased.
    pub fn matches(&self, lower: &str) -> bool {
        self.keywords.iter().any(|k| lower.contains(k))
    }
}

/// First rule (in table order) that fires.
pub fn first_match<'a, T>(rules: &'a [KeywordRule<T>], lower: &str) -> Option<&'a T> {
    rules.iter().find(|r| r.matches(lower)).map(|r| &r.value)
}

/// Last rule (in table order) that fires, so later rules override earlier ones.
pub fn last_match<'a, T>(rules: &'a [KeywordRule<T>], lower: &str) -> Option<&'a T> {
    rules.iter().rev().find(|r| r.matches(lower)).map(|r| &r.value)
}

/// True when any keyword is present.
pub fn contains_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    static RULES: &[KeywordRule<u8>] = &[
        KeywordRule { keywords: &["alpha", "beta"], value: 1 },
        KeywordRule { keywords: &["beta", "gamma"], value: 2 },
    ];

    #[test]
    fn test_first_and_last_match() {
        assert_eq!(first_match(RULES, "beta"), Some(&1));
        assert_eq!(last_match(RULES, "beta"), Some(&2));
        assert_eq!(first_match(RULES, "gamma ray"), Some(&2));
        assert_eq!(first_match(RULES, "delta"), None);
    }
}
