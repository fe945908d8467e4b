//! OAuth 2.0 access token (RFC 6749 §5.1)

use std::fmt;

use serde::Deserialize;

/// Bearer credential returned by the client-credentials exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Opaque token string.
    pub value: String,
    /// Token type as reported by the endpoint, usually `bearer`.
    pub token_type: String,
    /// Seconds until expiry; 0 when unknown.
    pub lifetime_seconds: i64,
}

#[derive(Deserialize)]
struct WireToken {
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    expires_in: i64,
}

impl AccessToken {
    /// Bearer token with an unknown lifetime.
    #[must_use]
    pub fn bearer(value: impl Into<String>) -> Self {
        Self { value: value.into(), token_type: "bearer".to_string(), lifetime_seconds: 0 }
    }

    /// Decode a token endpoint body. Unknown fields are ignored.
    ///
    /// # Errors
    /// Returns the decoder error when `access_token` is missing or the body
    /// is not JSON.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let wire: WireToken = serde_json::from_str(body)?;
        Ok(Self {
            value: wire.access_token,
            token_type: wire.token_type,
            lifetime_seconds: wire.expires_in,
        })
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("lifetime_seconds", &self.lifetime_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_token_and_ignores_unknown_fields() {
        let token = AccessToken::from_json(
            r#"{"access_token":"abc","token_type":"bearer","expires_in":86400,"scope":"openid"}"#,
        )
        .unwrap();

        assert_eq!(token.value, "abc");
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.lifetime_seconds, 86400);
        assert_eq!(token.authorization(), "Bearer abc");
    }

    #[test]
    fn missing_access_token_is_an_error() {
        assert!(AccessToken::from_json(r#"{"token_type":"bearer"}"#).is_err());
    }

    #[test]
    fn debug_output_redacts_value() {
        let rendered = format!("{:?}", AccessToken::bearer("secret-token"));
        assert!(!rendered.contains("secret-token"));
    }
}
