//! Bearer token issuance and verification.
//!
//! Tokens are a base64url-encoded JSON claims payload followed by an
//! HMAC-SHA256 tag over that payload, signed with the shared secret from the
//! node configuration. They are bearer credentials: no refresh, no revocation,
//! valid until the embedded expiry timestamp passes.

use crate::error::{MaternaError, MaternaResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use ring::hmac;
use serde::{Deserialize, Serialize};

/// Fixed token lifetime: 24 hours from issuance.
pub const TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

/// The three disjoint principal kinds.
///
/// Every token embeds the kind it was issued for, and every resolution is
/// bound to an expected kind. A token issued for one kind never resolves
/// against another kind's registry: the lookup consults a different tree and
/// simply finds nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    Officer,
    Caregiver,
    Patient,
}

impl std::fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Officer => write!(f, "officer"),
            Self::Caregiver => write!(f, "caregiver"),
            Self::Patient => write!(f, "patient"),
        }
    }
}

/// Signed token payload.
///
/// `sub` is the Officer/Caregiver username or the Patient national-ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub kind: PrincipalKind,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Issues and verifies tokens with a shared HMAC secret.
///
/// Constructed once from the node configuration and shared by reference;
/// never a module-level singleton.
pub struct TokenSigner {
    key: hmac::Key,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes()),
        }
    }

    /// Issue a token for the given principal kind and subject claim.
    pub fn issue(&self, kind: PrincipalKind, subject: &str) -> MaternaResult<String> {
        let claims = Claims {
            sub: subject.to_string(),
            kind,
            exp: (Utc::now() + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
        };
        self.issue_claims(&claims)
    }

    fn issue_claims(&self, claims: &Claims) -> MaternaResult<String> {
        let payload = serde_json::to_vec(claims)?;
        let tag = hmac::sign(&self.key, &payload);
        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(tag.as_ref())
        ))
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// Every failure mode (malformed token, bad signature, expired) collapses
    /// into [`MaternaError::AuthFailure`]; callers learn nothing about which
    /// check rejected the token.
    pub fn verify(&self, token: &str) -> MaternaResult<Claims> {
        let (payload_b64, tag_b64) = token.split_once('.').ok_or(MaternaError::AuthFailure)?;
        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| MaternaError::AuthFailure)?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|_| MaternaError::AuthFailure)?;

        hmac::verify(&self.key, &payload, &tag).map_err(|_| MaternaError::AuthFailure)?;

        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| MaternaError::AuthFailure)?;
        if claims.exp <= Utc::now().timestamp() {
            return Err(MaternaError::AuthFailure);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_verify() {
        let signer = TokenSigner::new("test-secret");
        let token = signer.issue(PrincipalKind::Caregiver, "mw_9012").unwrap();
        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.sub, "mw_9012");
        assert_eq!(claims.kind, PrincipalKind::Caregiver);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn wrong_secret_rejected() {
        let signer = TokenSigner::new("secret-a");
        let other = TokenSigner::new("secret-b");
        let token = signer.issue(PrincipalKind::Officer, "moh_admin").unwrap();
        assert!(matches!(
            other.verify(&token),
            Err(MaternaError::AuthFailure)
        ));
    }

    #[test]
    fn tampered_payload_rejected() {
        let signer = TokenSigner::new("test-secret");
        let token = signer.issue(PrincipalKind::Patient, "985761234V").unwrap();
        let (payload, tag) = token.split_once('.').unwrap();
        let forged = Claims {
            sub: "someone-else".to_string(),
            kind: PrincipalKind::Patient,
            exp: i64::MAX,
        };
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        assert!(signer.verify(&format!("{}.{}", forged_payload, tag)).is_err());
        assert!(signer.verify(&format!("{}.", payload)).is_err());
        assert!(signer.verify("no-dot-here").is_err());
    }

    #[test]
    fn expired_token_rejected_despite_valid_signature() {
        let signer = TokenSigner::new("test-secret");
        let claims = Claims {
            sub: "mw_9012".to_string(),
            kind: PrincipalKind::Caregiver,
            exp: (Utc::now() - Duration::seconds(5)).timestamp(),
        };
        let token = signer.issue_claims(&claims).unwrap();
        assert!(matches!(
            signer.verify(&token),
            Err(MaternaError::AuthFailure)
        ));
    }
}
