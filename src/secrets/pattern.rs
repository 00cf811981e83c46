//! Sensitive key pattern matching.
//!
//! This module decides whether a qualified key names a sensitive value by
//! checking it for case-insensitive substrings.

/// Built-in substrings that mark a key as sensitive.
///
/// Covers every category the fake value generator knows how to produce, so
/// that each of its rules is reachable.
pub const BUILTIN_PATTERNS: &[&str] = &[
    "api_key",
    "access_key",
    "secret",
    "password",
    "pass",
    "token",
    "client_secret",
    "private_key",
    "client_id",
    "username",
    "url",
    "endpoint",
];

/// A set of lower-cased substrings matched against qualified keys.
///
/// # Example
///
/// ```
/// use fixture_mangler::secrets::SensitivePatternSet;
///
/// let patterns = SensitivePatternSet::with_builtins();
///
/// assert!(patterns.is_sensitive("DB_PASSWORD"));
/// assert!(patterns.is_sensitive("github_token"));
/// assert!(!patterns.is_sensitive("replicas"));
/// ```
#[derive(Debug, Clone)]
pub struct SensitivePatternSet {
    patterns: Vec<String>,
}

impl SensitivePatternSet {
    /// Create a set with the built-in patterns.
    pub fn with_builtins() -> Self {
        Self::new(BUILTIN_PATTERNS.iter().copied())
    }

    /// Create a set from custom patterns only.
    pub fn new<S: AsRef<str>>(patterns: impl IntoIterator<Item = S>) -> Self {
        let mut set = Self {
            patterns: Vec::new(),
        };
        for pattern in patterns {
            set.add_pattern(pattern.as_ref());
        }
        set
    }

    /// Create a set with the built-in patterns plus extra substrings.
    ///
    /// # Example
    ///
    /// ```
    /// use fixture_mangler::secrets::SensitivePatternSet;
    ///
    /// let extra = vec!["Signing_Salt".to_string()];
    /// let patterns = SensitivePatternSet::with_builtins_and_custom(&extra);
    ///
    /// assert!(patterns.is_sensitive("cookie_signing_salt"));
    /// assert!(patterns.is_sensitive("api_key"));
    /// ```
    pub fn with_builtins_and_custom(extra: &[String]) -> Self {
        let mut set = Self::with_builtins();
        for pattern in extra {
            set.add_pattern(pattern);
        }
        set
    }

    /// Add a pattern. Empty and duplicate patterns are ignored.
    pub fn add_pattern(&mut self, pattern: &str) {
        let pattern = pattern.trim().to_lowercase();
        if !pattern.is_empty() && !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    /// Check whether a key contains any pattern, ignoring case.
    pub fn is_sensitive(&self, key: &str) -> bool {
        self.matching_pattern(key).is_some()
    }

    /// Get the first pattern contained in the key (for diagnostics).
    pub fn matching_pattern(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.patterns
            .iter()
            .find(|p| key.contains(p.as_str()))
            .map(String::as_str)
    }

    /// Get the number of patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl Default for SensitivePatternSet {
    fn default() -> Self {
        Self::with_builtins()
    }
}
