use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as PhcHash, PasswordHasher as PhcHasher, PasswordVerifier as PhcVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

const MEMORY_COST_KIB: u32 = 19_456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Argon2id hasher. Hashing and verification run on the blocking pool.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
  params: Params,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, AuthError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
      .map_err(|e| HashError::HashingFailed(format!("invalid argon2 params: {}", e)))?;

    Ok(Self { params })
  }

  fn argon2(params: Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    let params = self.params.clone();
    let password = password.clone();

    let phc = tokio::task::spawn_blocking(move || {
      let salt = SaltString::generate(&mut rand::rngs::OsRng);
      Self::argon2(params)
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| HashError::HashingFailed(e.to_string()))?
    .map_err(|e| HashError::HashingFailed(e.to_string()))?;

    Ok(PasswordHash::from_hash(phc)?)
  }

  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError> {
    let params = self.params.clone();
    let password = password.clone();
    let stored = hashed_password.as_str().to_string();

    let outcome = tokio::task::spawn_blocking(move || {
      let parsed = PhcHash::new(&stored)?;
      match Self::argon2(params).verify_password(password.as_str().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
      }
    })
    .await
    .map_err(|e| HashError::VerificationFailed(e.to_string()))?;

    outcome.map_err(|e| HashError::VerificationFailed(e.to_string()).into())
  }
}
