// Centralized error handling for the dashboard

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors raised while talking to an upstream service.
///
/// These never leave the fetcher that produced them: every fetcher logs the
/// error and falls back to an empty result for its category.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {service} failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned error status: {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} rejected the login credentials")]
    LoginRejected { service: &'static str },

    #[error("{service} calendar window of {days} days is out of range")]
    WindowOutOfRange { service: &'static str, days: i64 },
}

impl FetchError {
    pub fn transport(service: &'static str, source: reqwest::Error) -> Self {
        // reqwest reports body decode failures through the same error type
        if source.is_decode() {
            FetchError::Decode { service, source }
        } else {
            FetchError::Transport { service, source }
        }
    }

    /// True when the upstream answered with an authentication failure
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            FetchError::Status { status, .. }
                if *status == reqwest::StatusCode::UNAUTHORIZED
                    || *status == reqwest::StatusCode::FORBIDDEN
        )
    }
}

/// A single release timestamp that could not be interpreted
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReleaseTimeError {
    #[error("Release timestamp is empty")]
    Empty,

    #[error("Invalid release timestamp '{0}'")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Route not found")]
    NotFound,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            DashboardError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
        };

        (status, message).into_response()
    }
}
