//! Option strings for format configuration.
//!
//! Formats that support configuration accept a blank-separated list of
//! `key=value` tokens (e.g. `"delimiter=;"`). Splitting is lenient: a token
//! with exactly one `=` becomes one option, anything else is dropped
//! silently. Interpretation of the surviving keys is each format's own
//! business and is where strict validation happens.

/// Parsed format options: ordered `key=value` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pairs: Vec<(String, String)>,
}

impl FormatOptions {
    /// Splits a blank-separated option string into key/value pairs.
    ///
    /// Tokens with zero or more than one `=` are dropped without error.
    pub fn parse(raw: &str) -> Self {
        let mut pairs = Vec::new();
        for token in raw.split_whitespace() {
            if let Some((key, value)) = token.split_once('=') {
                if !value.contains('=') {
                    pairs.push((key.to_string(), value.to_string()));
                }
            }
        }
        Self { pairs }
    }

    /// Returns the value for `key`; the last occurrence wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether any options were recognized.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over the recognized `(key, value)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_single_equals_tokens_only() {
        let opts = FormatOptions::parse("delimiter=; invalidtoken");
        assert_eq!(opts.get("delimiter"), Some(";"));
        assert_eq!(opts.iter().count(), 1);
    }

    #[test]
    fn drops_tokens_with_multiple_equals() {
        let opts = FormatOptions::parse("a=b=c delimiter=,");
        assert_eq!(opts.get("a"), None);
        assert_eq!(opts.get("delimiter"), Some(","));
    }

    #[test]
    fn empty_string_yields_no_options() {
        let opts = FormatOptions::parse("");
        assert!(opts.is_empty());
        assert_eq!(opts.get("delimiter"), None);
    }

    #[test]
    fn last_occurrence_wins() {
        let opts = FormatOptions::parse("delimiter=, delimiter=;");
        assert_eq!(opts.get("delimiter"), Some(";"));
    }

    #[test]
    fn empty_value_is_recognized() {
        let opts = FormatOptions::parse("quote=");
        assert_eq!(opts.get("quote"), Some(""));
    }
}
