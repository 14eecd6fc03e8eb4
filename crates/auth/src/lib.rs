//! `medishop-auth`: mock operator sign-in.
//!
//! There are no credentials and no permissions: signing in only captures who
//! is at the counter so the dashboard can show it.

pub mod operator;
pub mod session;

pub use operator::{Operator, SignInError, sign_in};
pub use session::Session;
