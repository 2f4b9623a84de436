//! Mapping of HTTP failures onto [`BackendError`].

use reqwest::{Response, StatusCode};
use serde::Deserialize;

use ems_core::BackendError;

/// Which endpoint family produced the response; sign-up treats client
/// errors as validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    SignUp,
    Auth,
    Data,
}

/// Error body shapes used by the auth service and the data API.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.msg
            .or(self.error_description)
            .or(self.message)
            .or(self.error)
    }
}

pub(crate) fn map_status(endpoint: Endpoint, status: StatusCode, message: String) -> BackendError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Auth(message),
        StatusCode::NOT_FOUND => BackendError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
            if endpoint == Endpoint::SignUp =>
        {
            BackendError::Validation(message)
        }
        // The auth service answers a wrong password with 400 invalid_grant.
        StatusCode::BAD_REQUEST if endpoint == Endpoint::Auth => BackendError::Auth(message),
        _ => BackendError::Network(format!("{status}: {message}")),
    }
}

/// Pass successful responses through, turn the rest into a [`BackendError`].
pub(crate) async fn check(endpoint: Endpoint, response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    Err(map_status(endpoint, status, message))
}

/// Transport failures (DNS, TLS, timeout, undecodable body) are network errors.
pub(crate) fn transport(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::Network("request timed out".to_string())
    } else if error.is_decode() {
        BackendError::Network(format!("unexpected response body: {error}"))
    } else {
        BackendError::Network(error.to_string())
    }
}
