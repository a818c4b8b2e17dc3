//! Conversions from external infrastructure errors into domain errors.

use forcelink_domain::ForceError;
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ForceError);

impl From<InfraError> for ForceError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ForceError> for InfraError {
    fn from(value: ForceError) -> Self {
        InfraError(value)
    }
}

trait IntoForceError {
    fn into_force(self) -> ForceError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ForceError */
/* -------------------------------------------------------------------------- */

impl IntoForceError for HttpError {
    fn into_force(self) -> ForceError {
        if self.is_timeout() {
            return ForceError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ForceError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return ForceError::Decode(format!("HTTP response body could not be decoded: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => ForceError::Auth(message),
                429 => ForceError::RateLimit(message),
                400..=499 => ForceError::Client(message),
                500..=599 => ForceError::Server(message),
                _ => ForceError::Network(message),
            };
        }

        ForceError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_force())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → ForceError */
/* -------------------------------------------------------------------------- */

impl IntoForceError for UrlError {
    fn into_force(self) -> ForceError {
        ForceError::Config(format!("invalid instance URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_force())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
