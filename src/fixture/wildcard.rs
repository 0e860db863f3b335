//! Wildcard fixture keys.

use regex::Regex;

/// A fixture key containing `*`, compiled to an anchored matcher.
///
/// `*` expands to any (possibly empty) run of characters. Every other
/// character is matched literally, so `.` in `customers.*` is a dot and not
/// a regex metacharacter.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    pattern: String,
    matcher: Regex,
}

impl WildcardPattern {
    /// Compile `pattern`. Returns `None` if it has no `*`.
    #[must_use]
    pub fn compile(pattern: &str) -> Option<Self> {
        if !pattern.contains('*') {
            return None;
        }
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        // Escaped literals joined by `.*` always form a valid regex.
        let matcher = Regex::new(&format!("(?s)^{body}$")).ok()?;
        Some(Self {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    /// The original pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// True when `method` matches this pattern.
    #[must_use]
    pub fn matches(&self, method: &str) -> bool {
        self.matcher.is_match(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_keys_are_not_patterns() {
        assert!(WildcardPattern::compile("customers.create").is_none());
    }

    #[test]
    fn service_wildcard_matches_every_operation() {
        let pattern = WildcardPattern::compile("customers.*").unwrap();
        assert!(pattern.matches("customers.create"));
        assert!(pattern.matches("customers.retrieve"));
        assert!(pattern.matches("customers."));
        assert!(!pattern.matches("products.create"));
        assert!(!pattern.matches("customers"));
    }

    #[test]
    fn dots_are_literal() {
        let pattern = WildcardPattern::compile("customers.*").unwrap();
        assert!(!pattern.matches("customersXcreate"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let pattern = WildcardPattern::compile("a+b(c)?.*").unwrap();
        assert!(pattern.matches("a+b(c)?.x"));
        assert!(!pattern.matches("aab.x"));
    }

    #[test]
    fn leading_and_inner_wildcards() {
        let any_create = WildcardPattern::compile("*.create").unwrap();
        assert!(any_create.matches("products.create"));
        assert!(!any_create.matches("products.update"));

        let inner = WildcardPattern::compile("financial_connections.*.create").unwrap();
        assert!(inner.matches("financial_connections.sessions.create"));
        assert!(!inner.matches("financial_connections.sessions.retrieve"));

        let everything = WildcardPattern::compile("*").unwrap();
        assert!(everything.matches("anything.at.all"));
    }
}
