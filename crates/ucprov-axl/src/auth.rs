//! AXL endpoint credentials — HTTP Basic.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Credentials for the AXL endpoint.
///
/// Read-only after creation and reused, unmutated, across every call in a
/// run. The [`Debug`] impl redacts the password to keep it out of log output.
#[derive(Clone)]
pub struct AxlCredentials {
    username: String,
    password: String,
}

impl AxlCredentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// `Authorization` header value: `Basic <base64(user:pass)>`.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {encoded}")
    }
}

impl std::fmt::Debug for AxlCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxlCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_basic_auth() {
        let creds = AxlCredentials::new("jdoe", "secret");
        assert_eq!(creds.authorization_header(), "Basic amRvZTpzZWNyZXQ=");
    }

    #[test]
    fn debug_redacts_password() {
        let creds = AxlCredentials::new("jdoe", "hunter2");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("jdoe"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("hunter2"));
    }
}
