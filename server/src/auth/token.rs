//! Signed bearer tokens. Tokens are self-contained JWTs carrying the user
//! id and email; holders are re-checked against the users table on every
//! authenticated request, so a deleted account invalidates its tokens.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;

const DEFAULT_EXPIRES_IN_SECS: i64 = 7 * 24 * 60 * 60;

static JWT_SECRET: LazyLock<String> =
    LazyLock::new(|| std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"));

static JWT_EXPIRES_IN: LazyLock<i64> = LazyLock::new(|| {
    std::env::var("JWT_EXPIRES_IN")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_EXPIRES_IN_SECS)
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Signature checks out but the token is past its expiry.
    Expired,
    /// Undecodable, tampered, or signed with a different secret.
    Invalid,
}

pub fn issue_token(user_id: Uuid, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
    issue_with_secret(user_id, email, *JWT_EXPIRES_IN, JWT_SECRET.as_bytes())
}

pub fn verify_token(token: &str) -> Result<Claims, TokenError> {
    verify_with_secret(token, JWT_SECRET.as_bytes())
}

fn issue_with_secret(
    user_id: Uuid,
    email: &str,
    expires_in_secs: i64,
    secret: &[u8],
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        user_id,
        email: email.to_string(),
        iat,
        exp: iat + expires_in_secs,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
}

fn verify_with_secret(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";

    #[test]
    fn token_roundtrips_its_claims() {
        let user_id = Uuid::new_v4();
        let token = issue_with_secret(user_id, "a@b.com", 3600, SECRET).unwrap();
        let claims = verify_with_secret(&token, SECRET).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_rejected_distinctly() {
        // Expired well past the default 60s validation leeway.
        let token = issue_with_secret(Uuid::new_v4(), "a@b.com", -300, SECRET).unwrap();
        assert_eq!(verify_with_secret(&token, SECRET), Err(TokenError::Expired));
    }

    #[test]
    fn garbage_token_is_invalid() {
        assert_eq!(
            verify_with_secret("not.a.jwt", SECRET),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let token = issue_with_secret(Uuid::new_v4(), "a@b.com", 3600, b"other").unwrap();
        assert_eq!(verify_with_secret(&token, SECRET), Err(TokenError::Invalid));
    }
}
