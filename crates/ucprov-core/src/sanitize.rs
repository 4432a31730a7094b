//! User identifier sanitization.
//!
//! Identifiers end up interpolated into textual queries sent to the remote
//! directory, so every identifier must pass through [`sanitize_user_id`]
//! before any remote call is attempted. The allow-list is deliberately
//! narrow: ASCII alphanumerics only.

use std::fmt;

use thiserror::Error;

/// A user identifier that has passed sanitization.
///
/// The only way to obtain one is through [`sanitize_user_id`], which makes
/// the sanitizer a mandatory gate at the type level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw identifier was rejected by the sanitizer.
///
/// Non-fatal: the caller skips the unit and moves on.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid user identifier {raw:?}: must be non-empty and alphanumeric")]
pub struct InvalidIdentifier {
    /// The rejected input, as supplied (before trimming).
    pub raw: String,
}

/// Trim surrounding whitespace and accept the identifier iff the remainder
/// is non-empty and consists only of ASCII alphanumeric characters.
pub fn sanitize_user_id(raw: &str) -> Result<UserId, InvalidIdentifier> {
    let cleaned = raw.trim();
    if !cleaned.is_empty() && cleaned.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(UserId(cleaned.to_string()))
    } else {
        Err(InvalidIdentifier {
            raw: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_alphanumeric() {
        assert_eq!(sanitize_user_id("jdoe").unwrap().as_str(), "jdoe");
        assert_eq!(sanitize_user_id("JDoe42").unwrap().as_str(), "JDoe42");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(sanitize_user_id("  jdoe \n").unwrap().as_str(), "jdoe");
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert!(sanitize_user_id("").is_err());
        assert!(sanitize_user_id("   ").is_err());
    }

    #[test]
    fn rejects_special_characters() {
        for raw in ["j.doe", "jdoe'--", "j doe", "jdoe;", "jd\u{f8}e", "<jdoe>"] {
            let err = sanitize_user_id(raw).unwrap_err();
            assert_eq!(err.raw, raw);
        }
    }

    #[test]
    fn rejects_embedded_whitespace_after_trim() {
        assert!(sanitize_user_id(" jane doe ").is_err());
    }
}
