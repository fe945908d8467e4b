//! Request diagnostics attached to failures and warnings

use std::fmt;

/// The originating request of a UMAPI response.
///
/// Rendered into error messages and warning logs so an operator can replay
/// or inspect exactly what was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// HTTP method.
    pub method: String,
    /// Full request URL, query included.
    pub url: String,
    /// Request body, if any.
    pub payload: Option<String>,
}

impl RequestContext {
    /// `POST` of `payload` to `url`.
    #[must_use]
    pub fn post(url: impl Into<String>, payload: impl Into<String>) -> Self {
        Self { method: "POST".to_string(), url: url.into(), payload: Some(payload.into()) }
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)?;
        if let Some(payload) = &self.payload {
            write!(f, "\nwith payload:\n{payload}")?;
        }
        Ok(())
    }
}
