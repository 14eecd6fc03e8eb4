use serde::Serialize;

use crate::operator::{Operator, SignInError, sign_in};

/// Who, if anyone, is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    operator: Option<Operator>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operator(&self) -> Option<&Operator> {
        self.operator.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.operator.is_some()
    }

    /// Replace the current operator. A failed attempt keeps the old session.
    pub fn sign_in(&self, name: &str, email: &str) -> Result<Session, SignInError> {
        let operator = sign_in(name, email)?;
        Ok(Session {
            operator: Some(operator),
        })
    }

    pub fn sign_out(&self) -> Session {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_then_out() {
        let session = Session::new().sign_in("Dana", "dana@example.com").unwrap();
        assert!(session.is_signed_in());
        assert_eq!(session.operator().map(Operator::name), Some("Dana"));

        let session = session.sign_out();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn failed_sign_in_leaves_session_alone() {
        let session = Session::new().sign_in("Dana", "dana@example.com").unwrap();
        assert!(session.sign_in("Eli", "nope").is_err());
        assert_eq!(session.operator().map(Operator::email), Some("dana@example.com"));
    }
}
