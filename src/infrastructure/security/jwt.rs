//! HS256 access tokens.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::auth::ports::TokenService;
use crate::domain::auth::{AccessToken, AuthError, TokenClaims};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  sub: String,
  iat: i64,
  exp: i64,
}

pub struct JwtTokenService {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  expiration_seconds: i64,
}

impl JwtTokenService {
  pub fn new(secret: &[u8], expiration_seconds: i64) -> Self {
    Self {
      encoding_key: EncodingKey::from_secret(secret),
      decoding_key: DecodingKey::from_secret(secret),
      expiration_seconds,
    }
  }

  /// Accepts a base64 encoded secret. Values that are not valid base64 are used as raw bytes.
  pub fn from_base64_secret(secret: &str, expiration_seconds: i64) -> Self {
    match STANDARD.decode(secret.trim()) {
      Ok(bytes) => Self::new(&bytes, expiration_seconds),
      Err(_) => {
        tracing::warn!("JWT secret is not base64, using raw bytes");
        Self::new(secret.as_bytes(), expiration_seconds)
      }
    }
  }

  fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
  }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, AuthError> {
  DateTime::from_timestamp(secs, 0).ok_or_else(|| AuthError::Token(format!("bad timestamp {}", secs)))
}

#[async_trait]
impl TokenService for JwtTokenService {
  async fn issue(&self, username: &str) -> Result<AccessToken, AuthError> {
    let now = Utc::now();
    let expires_at = Duration::try_seconds(self.expiration_seconds)
      .and_then(|lifetime| now.checked_add_signed(lifetime))
      .ok_or_else(|| {
        AuthError::Token(format!(
          "token lifetime of {} seconds is out of range",
          self.expiration_seconds
        ))
      })?;

    let claims = Claims {
      sub: username.to_string(),
      iat: now.timestamp(),
      exp: expires_at.timestamp(),
    };

    let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
      .map_err(|e| AuthError::Token(format!("failed to sign token: {}", e)))?;

    Ok(AccessToken::new(token, expires_at))
  }

  async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
    let data = decode::<Claims>(token, &self.decoding_key, &Self::validation()).map_err(|e| {
      tracing::debug!("Rejected token: {}", e);
      AuthError::InvalidToken
    })?;

    Ok(TokenClaims {
      subject: data.claims.sub,
      issued_at: timestamp(data.claims.iat)?,
      expires_at: timestamp(data.claims.exp)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_issued_token_verifies_with_subject() {
    let service = JwtTokenService::new(b"signing-key", 600);

    let token = service.issue("alice").await.unwrap();
    let claims = service.verify(token.as_str()).await.unwrap();

    assert_eq!(claims.subject, "alice");
    assert_eq!(claims.expires_at.timestamp(), token.expires_at().timestamp());
    assert!(claims.issued_at < claims.expires_at);
  }

  #[tokio::test]
  async fn test_expired_token_is_rejected() {
    let service = JwtTokenService::new(b"signing-key", -60);

    let token = service.issue("alice").await.unwrap();

    assert!(matches!(
      service.verify(token.as_str()).await,
      Err(AuthError::InvalidToken)
    ));
  }

  #[tokio::test]
  async fn test_out_of_range_lifetime_is_an_error() {
    let service = JwtTokenService::new(b"signing-key", i64::MAX);

    assert!(matches!(
      service.issue("alice").await,
      Err(AuthError::Token(_))
    ));
  }

  #[tokio::test]
  async fn test_token_signed_with_other_key_is_rejected() {
    let issuer = JwtTokenService::new(b"signing-key", 600);
    let verifier = JwtTokenService::new(b"another-key", 600);

    let token = issuer.issue("alice").await.unwrap();

    assert!(verifier.verify(token.as_str()).await.is_err());
    assert!(verifier.verify("not-a-jwt").await.is_err());
  }

  #[tokio::test]
  async fn test_base64_secret_matches_raw_key() {
    let encoded = STANDARD.encode(b"signing-key");
    let from_config = JwtTokenService::from_base64_secret(&encoded, 600);
    let raw = JwtTokenService::new(b"signing-key", 600);

    let token = from_config.issue("bob").await.unwrap();
    assert_eq!(raw.verify(token.as_str()).await.unwrap().subject, "bob");
  }
}
