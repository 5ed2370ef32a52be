//! HS256 JWT generation and validation for admin sessions.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use makeuslive_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every admin token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the admin's id
    pub sub: Uuid,
    pub email: String,
    /// Expiration time (UTC Unix timestamp)
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp)
    pub iat: i64,
}

/// Generate an HS256 token for the given admin.
pub fn generate_token(
    secret: &str,
    expiry_hours: i64,
    admin_id: Uuid,
    email: &str,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: admin_id,
        email: email.to_string(),
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Validate a token and return its claims. Expiry is enforced.
pub fn validate_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-min-32-characters-long";

    #[test]
    fn roundtrip() {
        let admin_id = Uuid::new_v4();
        let token = generate_token(SECRET, 24, admin_id, "admin@makeuslive.com").expect("sign");
        let claims = validate_token(SECRET, &token).expect("validate");
        assert_eq!(claims.sub, admin_id);
        assert_eq!(claims.email, "admin@makeuslive.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = generate_token(SECRET, 24, Uuid::new_v4(), "a@b.co").expect("sign");
        assert!(validate_token("another-secret-also-32-chars-long!!", &token).is_err());
    }

    #[test]
    fn expired_token_rejected() {
        let token = generate_token(SECRET, -1, Uuid::new_v4(), "a@b.co").expect("sign");
        let err = validate_token(SECRET, &token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn garbage_rejected() {
        assert!(validate_token(SECRET, "not.a.token").is_err());
    }
}
