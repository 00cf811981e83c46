//! Sensitive key detection and fake value generation.
//!
//! - [`SensitivePatternSet`] - Decides whether a qualified key is sensitive
//! - [`FakeValueGenerator`] - Produces deterministic placeholders per key
//! - [`BUILTIN_PATTERNS`] - Built-in sensitive substrings
//!
//! # Example
//!
//! ```
//! use fixture_mangler::secrets::{FakeValueGenerator, SensitivePatternSet};
//!
//! let patterns = SensitivePatternSet::with_builtins();
//! assert!(patterns.is_sensitive("client_id"));
//!
//! let value = FakeValueGenerator::new().generate("client_id", "1234.apps");
//! assert!(value.ends_with(".googleusercontent.com"));
//! ```

pub mod fake;
pub mod pattern;

pub use fake::{seed_for, FakeRule, FakeValueGenerator, FAKE_RULES, FAKE_URL};
pub use pattern::{SensitivePatternSet, BUILTIN_PATTERNS};
