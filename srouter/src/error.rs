//! Router errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use sprovider::{ProviderError, ProviderErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterErrorKind {
    InvalidInput,
    Provider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterError {
    pub kind: RouterErrorKind,
    pub message: String,
    pub provider_kind: Option<ProviderErrorKind>,
}

impl RouterError {
    pub fn new(kind: RouterErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider_kind: None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(RouterErrorKind::InvalidInput, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(RouterErrorKind::Provider, message)
    }

    /// True when the completion service could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        matches!(
            self.provider_kind,
            Some(
                ProviderErrorKind::Transport
                    | ProviderErrorKind::Timeout
                    | ProviderErrorKind::Unavailable
            )
        )
    }
}

impl Display for RouterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.provider_kind {
            Some(provider_kind) => {
                write!(f, "{:?} ({:?}): {}", self.kind, provider_kind, self.message)
            }
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for RouterError {}

impl From<ProviderError> for RouterError {
    fn from(value: ProviderError) -> Self {
        Self {
            kind: RouterErrorKind::Provider,
            message: value.message,
            provider_kind: Some(value.kind),
        }
    }
}
