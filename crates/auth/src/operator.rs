use serde::{Deserialize, Serialize};
use thiserror::Error;

use medishop_core::DomainError;

/// Why a sign-in attempt was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SignInError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please enter a valid email")]
    InvalidEmail,
}

impl From<SignInError> for DomainError {
    fn from(value: SignInError) -> Self {
        DomainError::validation(value.to_string())
    }
}

/// The person operating the shop for this session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    name: String,
    email: String,
}

impl Operator {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Capture an operator from the sign-in form.
///
/// Any non-blank name and any email containing `@` is accepted.
pub fn sign_in(name: &str, email: &str) -> Result<Operator, SignInError> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() {
        return Err(SignInError::MissingFields);
    }
    if !email.contains('@') {
        return Err(SignInError::InvalidEmail);
    }

    Ok(Operator {
        name: name.to_string(),
        email: email.to_string(),
    })
}
