// ── Login form rules ──
//
// Field-level checks the login form runs before it hands credentials to
// the controller. Errors only surface for fields the user has touched;
// a submit touches both.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::model::Credentials;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Email é obrigatório")]
    EmailRequired,
    #[error("Email inválido")]
    EmailInvalid,
    #[error("Senha é obrigatória")]
    PasswordRequired,
    #[error("Senha deve ter pelo menos 6 caracteres")]
    PasswordTooShort,
}

/// Required check on the trimmed value; the pattern sees the raw input.
pub fn validate_email(email: &str) -> Option<FieldError> {
    if email.trim().is_empty() {
        Some(FieldError::EmailRequired)
    } else if !EMAIL_PATTERN.is_match(email) {
        Some(FieldError::EmailInvalid)
    } else {
        None
    }
}

pub fn validate_password(password: &str) -> Option<FieldError> {
    if password.trim().is_empty() {
        Some(FieldError::PasswordRequired)
    } else if password.chars().count() < MIN_PASSWORD_CHARS {
        Some(FieldError::PasswordTooShort)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
}

/// Editable login form with touched-state tracking.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    email: String,
    password: String,
    email_touched: bool,
    password_touched: bool,
}

impl LoginForm {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Email => self.email = value.into(),
            Field::Password => self.password = value.into(),
        }
    }

    /// Mark a field as visited; its error becomes visible.
    pub fn touch(&mut self, field: Field) {
        match field {
            Field::Email => self.email_touched = true,
            Field::Password => self.password_touched = true,
        }
    }

    /// Error to display for `field`, if it has been touched.
    pub fn error(&self, field: Field) -> Option<FieldError> {
        match field {
            Field::Email if self.email_touched => validate_email(&self.email),
            Field::Password if self.password_touched => validate_password(&self.password),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        validate_email(&self.email).is_none() && validate_password(&self.password).is_none()
    }

    /// Touch both fields and, when valid, produce credentials with the
    /// email trimmed.
    pub fn submit(&mut self) -> Option<Credentials> {
        self.touch(Field::Email);
        self.touch(Field::Password);
        self.is_valid()
            .then(|| Credentials::new(self.email.trim(), self.password.clone()))
    }
}
