use secrecy::{ExposeSecret, SecretString};

/// One submitted email/password pair.
///
/// Transient: built per submission and dropped once the verdict is in.
/// The password is redacted from `Debug` output.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// True when either field is the empty string.
    ///
    /// Whitespace-only values are *not* empty here; they reach the
    /// validator and fail the exact comparison.
    pub fn has_empty_field(&self) -> bool {
        self.email.is_empty() || self.password.expose_secret().is_empty()
    }
}
