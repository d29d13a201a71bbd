use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::RegisterRequest;

pub const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Username, password and email are required")]
    MissingField,
    #[error("A valid email address is required")]
    InvalidEmailFormat,
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,
}

/// A registration payload that passed every check.
#[derive(Debug)]
pub struct NewRegistration {
    pub username: String,
    pub password: String,
    pub email: String,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn present(field: Option<String>) -> Result<String, ValidationError> {
    field
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField)
}

/// Checks run in order; the first failure is returned.
pub fn validate_registration(req: RegisterRequest) -> Result<NewRegistration, ValidationError> {
    let username = present(req.username)?;
    let password = present(req.password)?;
    let email = present(req.email)?;

    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmailFormat);
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }

    Ok(NewRegistration {
        username,
        password,
        email,
    })
}
