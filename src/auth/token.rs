use chrono::{Duration, Utc};
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AuthError};
use crate::store::models::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // User ID
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub iat: i64,     // Issued at
    pub exp: i64,     // Expiration time
}

/// Signs and validates bearer tokens. The signing key and expiry window come
/// from configuration; issued-at/expiry are the only time-dependent fields.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl TokenIssuer {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Token signing failed: {}", e)))
    }

    /// Rejects bad signatures, expired tokens and tokens without a subject,
    /// all as authentication errors.
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;

        if data.claims.sub.is_empty() {
            return Err(AppError::Auth(AuthError::InvalidToken));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_user() -> User {
        User::new(
            "john@x.com".to_string(),
            "John".to_string(),
            "Doe".to_string(),
            "$2b$04$hash".to_string(),
        )
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let issuer = TokenIssuer::new("test_secret", 24);
        let user = sample_user();

        let token = issuer.issue(&user).unwrap();
        let claims = issuer.validate(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, "john@x.com");
        assert_eq!(claims.first_name, "John");
        assert_eq!(claims.last_name, "Doe");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_subject_parses_back_to_user_id() {
        let issuer = TokenIssuer::new("test_secret", 24);
        let user = sample_user();

        let token = issuer.issue(&user).unwrap();
        let claims = issuer.validate(&token).unwrap();
        assert_eq!(Uuid::parse_str(&claims.sub).unwrap(), user.id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenIssuer::new("test_secret", 24);
        let other = TokenIssuer::new("other_secret", 24);

        let token = issuer.issue(&sample_user()).unwrap();
        let err = other.validate(&token).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Expiry two hours in the past clears the default validation leeway
        let issuer = TokenIssuer::new("test_secret", -2);
        let token = issuer.issue(&sample_user()).unwrap();

        let err = issuer.validate(&token).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::TokenExpired)));
    }

    #[test]
    fn test_empty_subject_rejected() {
        let issuer = TokenIssuer::new("test_secret", 24);
        let now = Utc::now();
        let claims = Claims {
            sub: String::new(),
            email: "john@x.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test_secret"),
        )
        .unwrap();

        let err = issuer.validate(&token).unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let issuer = TokenIssuer::new("test_secret", 24);
        let err = issuer.validate("not-a-jwt").unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidToken)));
    }
}
