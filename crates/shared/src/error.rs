use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    RateLimited,
    Unavailable,
    Http,
    Transport,
    Decode,
}

/// Failure talking to the remote catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("failed to fetch {resource}: {message}")]
    Transport { resource: String, message: String },
    #[error("failed to fetch {resource}: HTTP {status} {reason}")]
    Status {
        resource: String,
        status: u16,
        reason: String,
    },
    #[error("failed to decode {resource}: {message}")]
    Decode { resource: String, message: String },
}

impl NetworkError {
    pub fn transport(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn status(resource: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            resource: resource.into(),
            status,
            reason: reason.into(),
        }
    }

    pub fn decode(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn resource(&self) -> &str {
        match self {
            Self::Transport { resource, .. }
            | Self::Status { resource, .. }
            | Self::Decode { resource, .. } => resource,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Transport { .. } => ErrorCode::Transport,
            Self::Decode { .. } => ErrorCode::Decode,
            Self::Status { status: 404, .. } => ErrorCode::NotFound,
            Self::Status { status: 429, .. } => ErrorCode::RateLimited,
            Self::Status { status, .. } if *status >= 500 => ErrorCode::Unavailable,
            Self::Status { .. } => ErrorCode::Http,
        }
    }
}
