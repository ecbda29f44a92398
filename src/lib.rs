//! Cryptographically-random password generation from ASCII character classes.
//!
//! The interesting part lives in [`password_generation`]; this module holds the types shared with
//! the `fast-pass` binary.

pub mod password_generation;

pub use password_generation::{generate, generate_password, PasswordSpec};

/// A generated password.
///
/// `Debug` output is opaque so that a password never ends up in a log line by accident; use
/// [`Secret::as_str`] (or `Display`) when the password is actually meant to be shown.
#[derive(Clone, Eq, PartialEq)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of characters in the password.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reasons a password could not be generated.
///
/// Both are validation failures on the input and are detected before any randomness is drawn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("Length must be non-negative")]
    InvalidLength(i64),
    /// The (deduplicated) exclude set is at least as large as the unfiltered character list.
    #[error("Excluded chars surpasses valid charlist")]
    PoolExhausted { excluded: usize, available: usize },
}
