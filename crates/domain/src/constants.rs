//! Protocol constants
//!
//! Centralized location for the fixed limits of the UMAPI protocol and the
//! defaults of the configuration surface.

// UMAPI protocol limits
/// Commands per action request.
pub const MAX_COMMANDS_PER_REQUEST: usize = 10;
/// Retries of a rate-limited request after the first attempt.
pub const MAX_RETRIES: u32 = 3;
/// Base retry delay when the server sends no `Retry-After`.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;
/// Backoff growth per attempt (+50%).
pub const RETRY_DELAY_MULTIPLIER: f64 = 1.5;

// Headers
/// Header carrying the client id.
pub const API_KEY_HEADER: &str = "X-Api-Key";
/// Query appended in test-only mode.
pub const TEST_ONLY_QUERY: &str = "testOnly=true";

// Configuration defaults
/// UMAPI action endpoint, without the organization id.
pub const DEFAULT_UMAPI_BASE_URL: &str = "https://usermanagement.adobe.io/v2/usermanagement/action/";
/// IMS token endpoint.
pub const DEFAULT_IMS_TOKEN_ENDPOINT_URL: &str = "https://ims-na1.adobelogin.com/ims/token/v3";
/// Scopes requested with the client-credentials grant.
pub const DEFAULT_SCOPES: [&str; 3] = ["openid", "AdobeID", "user_management_sdk"];
/// Connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2_000;
/// Read timeout.
pub const DEFAULT_SOCKET_TIMEOUT_MS: u64 = 10_000;

/// Label under which this external group manager is reported.
pub const IMS_LABEL: &str = "Adobe IMS";
