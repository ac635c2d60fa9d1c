use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{Claims, SessionKind};

/// A freshly signed session token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Signs and verifies HS256 session tokens
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_secret(config.jwt_secret.as_bytes(), &config.issuer, config.token_ttl)
    }

    pub fn from_secret(secret: &[u8], issuer: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer: issuer.to_string(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, subject: Uuid, kind: SessionKind) -> Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let expires_in = i64::try_from(self.ttl.as_secs())
            .map_err(|_| AppError::Internal("Token TTL out of range".to_string()))?;

        let claims = Claims {
            sub: subject,
            kind,
            iat: now,
            exp: now + expires_in,
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))?;

        tracing::debug!(subject = %subject, kind = ?kind, "Session token issued");
        Ok(IssuedToken { token, expires_in })
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::Auth("Session has expired".to_string()),
                _ => AppError::Auth("Invalid session token".to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-that-is-at-least-32-bytes!";

    fn service(issuer: &str) -> TokenService {
        TokenService::from_secret(SECRET, issuer, Duration::from_secs(3600))
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service("building-ledger");
        let subject = Uuid::new_v4();

        let issued = tokens.issue(subject, SessionKind::Flat).unwrap();
        assert_eq!(issued.expires_in, 3600);

        let claims = tokens.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, subject);
        assert_eq!(claims.kind, SessionKind::Flat);
        assert_eq!(claims.iss, "building-ledger");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_rejects_wrong_issuer() {
        let issued = service("someone-else").issue(Uuid::new_v4(), SessionKind::Admin).unwrap();
        let err = service("building-ledger").verify(&issued.token).unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let issued = service("building-ledger")
            .issue(Uuid::new_v4(), SessionKind::Admin)
            .unwrap();
        let other = TokenService::from_secret(
            b"another-secret-that-is-at-least-32-bytes",
            "building-ledger",
            Duration::from_secs(3600),
        );
        assert!(other.verify(&issued.token).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            kind: SessionKind::Admin,
            iat: now - 7200,
            exp: now - 3600,
            iss: "building-ledger".to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let err = service("building-ledger").verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Auth(ref m) if m == "Session has expired"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(service("building-ledger").verify("not-a-jwt").is_err());
        assert!(service("building-ledger").verify("").is_err());
    }
}
