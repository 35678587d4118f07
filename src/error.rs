//! Error taxonomy for quiz and admin actions.
//!
//! None of these are fatal: the route layer turns each variant into a page or
//! a redirect at the request boundary.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// A required field is empty or an answer letter is malformed.
    #[error("{0}")]
    Validation(String),

    /// Admin credentials did not match.
    #[error("invalid credentials")]
    Auth,

    /// An admin-only page was requested without the admin flag.
    #[error("admin login required")]
    NotAuthenticated,
}

impl QuizError {
    pub fn validation(msg: impl Into<String>) -> Self {
        QuizError::Validation(msg.into())
    }
}
