//! bcrypt password hashing, run on the blocking pool.

use crate::server::error::AppError;

#[cfg(not(test))]
const BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
const BCRYPT_COST: u32 = 4;

pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(AppError::from)
}

/// # Returns
/// - `Ok(true)` - `password` matches `hash`
/// - `Ok(false)` - Mismatch
/// - `Err(AppError::BcryptErr)` - `hash` is not a valid bcrypt hash
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Password verification task failed: {e}")))?
        .map_err(AppError::from)
}
