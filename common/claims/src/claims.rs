use std::collections::BTreeSet;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ClaimsError, ClaimsResult};

/// Long-form role claim key emitted by the backend's token issuer.
pub const NAMESPACED_ROLE_KEY: &str =
    "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Application-focused view of an unverified bearer-token payload.
///
/// No signature verification happens here; the decoded roles are a navigation
/// hint only. The server enforces the real authorization boundary.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub subject: Option<String>,
    pub email: Option<String>,
    pub roles: BTreeSet<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub raw: serde_json::Value,
}

impl TokenClaims {
    /// Convenience helper for role checks.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

#[derive(Debug, Deserialize)]
struct ClaimsRepr {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(
        default,
        rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role"
    )]
    namespaced_role: Option<RoleRepr>,
    #[serde(default)]
    role: Option<RoleRepr>,
    #[serde(default)]
    roles: Option<RoleRepr>,
    #[serde(default)]
    exp: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoleRepr {
    Single(String),
    Many(Vec<String>),
}

impl RoleRepr {
    fn into_set(self) -> BTreeSet<String> {
        match self {
            RoleRepr::Single(role) => BTreeSet::from([role]),
            RoleRepr::Many(roles) => roles.into_iter().collect(),
        }
    }
}

/// Decode the middle segment of a bearer token into [`TokenClaims`].
///
/// # Errors
///
/// Fails when the token is not three dot-separated segments, the payload is
/// not base64url, or the payload is not the expected JSON shape.
pub fn decode_claims(token: &str) -> ClaimsResult<TokenClaims> {
    let payload = claims_segment(token)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('=').as_bytes())
        .map_err(|err| ClaimsError::InvalidBase64(err.to_string()))?;
    let raw: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|err| ClaimsError::InvalidJson(err.to_string()))?;
    let repr: ClaimsRepr = serde_json::from_value(raw.clone())
        .map_err(|err| ClaimsError::InvalidJson(err.to_string()))?;

    // Role claim lookup order: namespaced key, then `role`, then `roles`.
    let claim = repr.namespaced_role.or(repr.role).or(repr.roles);
    let expires_at = match repr.exp {
        Some(exp) => Some(
            Utc.timestamp_opt(exp, 0)
                .single()
                .ok_or_else(|| ClaimsError::InvalidClaim("exp", exp.to_string()))?,
        ),
        None => None,
    };

    Ok(TokenClaims {
        subject: repr.sub,
        email: repr.email,
        roles: claim.map(RoleRepr::into_set).unwrap_or_default(),
        expires_at,
        raw,
    })
}

/// Decode the role claims of a bearer token, swallowing every decoding
/// failure to the empty set. Losing role information degrades navigation,
/// never authentication, so this must not fail the caller.
pub fn decode_roles(token: &str) -> BTreeSet<String> {
    match decode_claims(token) {
        Ok(claims) => claims.roles,
        Err(err) => {
            debug!(error = %err, "could not decode role claims; treating as empty");
            BTreeSet::new()
        }
    }
}

fn claims_segment(token: &str) -> ClaimsResult<&str> {
    let mut segments = token.split('.');
    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => Ok(payload),
        _ => Err(ClaimsError::SegmentCount),
    }
}
