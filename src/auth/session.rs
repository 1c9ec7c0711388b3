use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const SESSION_TTL_DAYS: i64 = 7;
const FAILED_LOGIN_DELAY: std::time::Duration = std::time::Duration::from_millis(500);

/// Claims carried by an admin session credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Outcome of credential validation. Failures carry a reason for logging
/// but are never surfaced to callers in any distinguishable form.
#[derive(Debug)]
pub enum SessionVerdict {
    Valid(Claims),
    Invalid(InvalidReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Malformed,
    BadSignature,
    Expired,
    NotAdmin,
}

/// Issues and validates signed admin session credentials.
///
/// The gate holds only the configured password and the signing secret; there
/// is no server-side session list. A credential is valid until its embedded
/// expiry and cannot be refreshed or revoked.
pub struct SessionGate {
    admin_password: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionGate {
    #[must_use]
    pub fn new(admin_password: String, secret: &[u8]) -> Self {
        Self {
            admin_password,
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Checks the supplied password and mints a 7-day admin credential.
    /// A mismatch sleeps ~500ms before failing, to blunt rapid brute-force
    /// guessing.
    pub async fn issue(&self, supplied_password: &str) -> Result<String> {
        if supplied_password != self.admin_password {
            tokio::time::sleep(FAILED_LOGIN_DELAY).await;
            return Err(Error::InvalidPassword);
        }

        let now = Utc::now();
        let claims = Claims {
            admin: true,
            iat: now.timestamp(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Config(format!("failed to sign session token: {e}")))
    }

    /// Verifies signature and expiry. Every failure collapses to an
    /// `Invalid` verdict; validation never propagates an error.
    #[must_use]
    pub fn validate(&self, token: &str) -> SessionVerdict {
        // HS256 only, so a crafted header cannot downgrade verification.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "iat"]);

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) if data.claims.admin => SessionVerdict::Valid(data.claims),
            Ok(_) => SessionVerdict::Invalid(InvalidReason::NotAdmin),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    SessionVerdict::Invalid(InvalidReason::Expired)
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    SessionVerdict::Invalid(InvalidReason::BadSignature)
                }
                _ => SessionVerdict::Invalid(InvalidReason::Malformed),
            },
        }
    }

    /// Boolean view of [`validate`](Self::validate) for callers that only
    /// gate on the outcome.
    #[must_use]
    pub fn is_admin(&self, token: &str) -> bool {
        matches!(self.validate(token), SessionVerdict::Valid(_))
    }
}
