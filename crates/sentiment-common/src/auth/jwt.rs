//! Bearer access tokens
//!
//! HS256 tokens issued at login/registration via `jsonwebtoken`. There is
//! no refresh flow; clients log in again once a token expires.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sentiment_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username at issue time, for logs
    pub name: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// The authenticated user's id
    ///
    /// # Errors
    /// Returns `InvalidToken` if the subject is not a Snowflake
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }
}

/// Issued token as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// Issues and validates access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_secs,
        }
    }

    /// Issue a token for a user
    ///
    /// # Errors
    /// Returns an internal error if encoding fails
    pub fn issue(&self, user_id: Snowflake, username: &str) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            name: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.expiry_secs)).timestamp(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to encode JWT: {e}")))?;

        Ok(AccessToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expiry_secs,
        })
    }

    /// Decode and validate a token
    ///
    /// # Errors
    /// Returns `TokenExpired` or `InvalidToken`
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiry_secs", &self.expiry_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-long-enough";

    #[test]
    fn test_issue_and_validate() {
        let service = JwtService::new(SECRET, 3600);
        let token = service.issue(Snowflake::new(42), "alice").unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 3600);

        let claims = service.validate(&token.access_token).unwrap();
        assert_eq!(claims.user_id().unwrap(), Snowflake::new(42));
        assert_eq!(claims.name, "alice");
    }

    #[test]
    fn test_expired_token() {
        // Past the default 60s leeway
        let service = JwtService::new(SECRET, -120);
        let token = service.issue(Snowflake::new(1), "bob").unwrap();
        assert!(matches!(
            service.validate(&token.access_token),
            Err(AppError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtService::new(SECRET, 3600)
            .issue(Snowflake::new(1), "bob")
            .unwrap();
        let other = JwtService::new("a-different-secret", 3600);
        assert!(matches!(
            other.validate(&token.access_token),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(other.validate("garbage"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = Claims {
            sub: "abc".into(),
            name: "x".into(),
            iat: 0,
            exp: 0,
        };
        assert!(matches!(claims.user_id(), Err(AppError::InvalidToken)));
    }
}
