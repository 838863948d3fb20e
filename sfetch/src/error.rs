//! Fetch errors for outbound data sources.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The source answered, but not with the shape we expected.
    RemoteFormat,
    RemoteUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn remote_format(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::RemoteFormat, message)
    }

    pub fn remote_unavailable(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::RemoteUnavailable, message)
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        Self::remote_unavailable(value.to_string())
    }
}
