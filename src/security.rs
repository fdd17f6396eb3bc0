use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::constants::BCRYPT_COST;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a plaintext password with bcrypt
///
/// bcrypt is CPU-bound, so callers on the async runtime should run this
/// inside `spawn_blocking`.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

/// Check a plaintext password against a stored bcrypt hash
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::error!("Stored password hash could not be parsed: {}", e);
            false
        }
    }
}

// =============================================================================
// Session Tokens
// =============================================================================

/// Claims carried by the `jwt` cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owner id, as a decimal string
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue an HS256 token whose subject is the owner id
pub fn issue_token(
    owner_id: i32,
    secret: &str,
    ttl: chrono::Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: owner_id.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and return the owner id in its subject
///
/// Returns `None` for a bad signature, an expired token, or a subject that
/// is not a positive integer.
pub fn verify_token(token: &str, secret: &str) -> Option<i32> {
    let validation = Validation::new(Algorithm::HS256);
    let data = match jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!("Rejected session token: {}", e);
            return None;
        }
    };

    match data.claims.sub.parse::<i32>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            tracing::warn!("Session token subject is not an owner id: {}", data.claims.sub);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key";

    #[test]
    fn test_hash_and_verify_password() {
        let hash = hash_password("vErYSeCuRePaSsWoRd123!").unwrap();
        assert_ne!(hash, "vErYSeCuRePaSsWoRd123!");
        assert!(verify_password("vErYSeCuRePaSsWoRd123!", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_verify_password_with_garbage_hash() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_token_round_trip() {
        let token = issue_token(42, SECRET, chrono::Duration::days(30)).unwrap();
        assert_eq!(verify_token(&token, SECRET), Some(42));
    }

    #[test]
    fn test_token_wrong_secret() {
        let token = issue_token(42, SECRET, chrono::Duration::days(30)).unwrap();
        assert_eq!(verify_token(&token, "other-secret"), None);
    }

    #[test]
    fn test_token_expired() {
        // Past the default 60s leeway
        let token = issue_token(42, SECRET, chrono::Duration::minutes(-5)).unwrap();
        assert_eq!(verify_token(&token, SECRET), None);
    }

    #[test]
    fn test_token_garbage() {
        assert_eq!(verify_token("not.a.token", SECRET), None);
        assert_eq!(verify_token("", SECRET), None);
    }

    #[test]
    fn test_token_non_numeric_subject() {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: "demo".to_string(),
            iat: now,
            exp: now + 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(verify_token(&token, SECRET), None);
    }
}
