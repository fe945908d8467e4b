//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use umsync_domain::SyncError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SyncError);

impl From<InfraError> for SyncError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SyncError> for InfraError {
    fn from(value: SyncError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoSyncError {
    fn into_sync(self) -> SyncError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SyncError */
/* -------------------------------------------------------------------------- */

impl IntoSyncError for HttpError {
    fn into_sync(self) -> SyncError {
        let url = self.url().map(ToString::to_string).unwrap_or_else(|| "<unknown>".into());

        if self.is_timeout() {
            return SyncError::Network(format!("request to {url} timed out"));
        }
        if self.is_connect() {
            return SyncError::Network(format!("failed to connect to {url}: {self}"));
        }
        if self.is_builder() {
            return SyncError::Internal(format!("invalid HTTP request: {self}"));
        }
        if self.is_body() || self.is_decode() {
            return SyncError::Network(format!("failed to read response body from {url}: {self}"));
        }

        SyncError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_sync())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → SyncError */
/* -------------------------------------------------------------------------- */

impl IntoSyncError for UrlError {
    fn into_sync(self) -> SyncError {
        SyncError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_sync())
    }
}
