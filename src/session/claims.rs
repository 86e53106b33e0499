//! Advisory access-token claims decoding
//!
//! The access token is a three-segment dot-delimited JWT whose middle segment
//! is a base64url JSON document. Only expiry and identity are read here; the
//! signature is never verified. Decoding is advisory (UX and expiry checks) —
//! authorization decisions that matter are made server-side.

use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

/// Identity and expiry facts embedded in an access token payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject identifier (`sub` claim)
    pub subject_id: String,

    /// Best-effort email: `email`, else `username`, else `name`, else empty
    pub email: String,

    /// Expiry as seconds since the Unix epoch (`exp` claim)
    pub expires_at: i64,
}

impl Claims {
    /// Whether the token's expiry is at or before the current instant.
    ///
    /// A token is usable only while `expires_at` is strictly in the future.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now().timestamp()
    }
}

/// Claims decoding failures. Internal to the session module: callers of the
/// session manager observe "no claims" (logged-out), never this error.
#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("token is not a three-segment JWT")]
    MalformedToken,

    #[error("invalid base64url payload: {0}")]
    InvalidEncoding(String),

    #[error("invalid claims JSON: {0}")]
    InvalidPayload(String),

    #[error("missing required claim: {0}")]
    MissingClaim(&'static str),
}

#[derive(Debug, Deserialize)]
struct RawClaims {
    sub: Option<String>,
    exp: Option<i64>,
    email: Option<String>,
    username: Option<String>,
    name: Option<String>,
}

/// Decode base64url (URL-safe base64 without padding)
fn base64_decode_url(input: &str) -> Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose};

    // Base64url uses - instead of + and _ instead of /
    let standard_b64 = input.replace('-', "+").replace('_', "/");

    // Add padding if needed
    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return Err("Invalid base64url length".to_string()),
    };

    let padded = format!("{}{}", standard_b64, padding);

    general_purpose::STANDARD
        .decode(&padded)
        .map_err(|e| e.to_string())
}

/// Decode the middle segment of an access token into [`Claims`].
pub fn decode(token: &str) -> Result<Claims, ClaimsError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ClaimsError::MalformedToken);
    }

    let payload_bytes = base64_decode_url(parts[1]).map_err(ClaimsError::InvalidEncoding)?;

    let raw: RawClaims = serde_json::from_slice(&payload_bytes)
        .map_err(|e| ClaimsError::InvalidPayload(e.to_string()))?;

    let subject_id = raw.sub.ok_or(ClaimsError::MissingClaim("sub"))?;
    let expires_at = raw.exp.ok_or(ClaimsError::MissingClaim("exp"))?;

    let email = raw
        .email
        .or(raw.username)
        .or(raw.name)
        .unwrap_or_default();

    Ok(Claims {
        subject_id,
        email,
        expires_at,
    })
}
