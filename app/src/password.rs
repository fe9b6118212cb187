use crate::error::{AppError, Result};

/// Work factor for new hashes.
pub const HASH_COST: u32 = 10;

pub async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, HASH_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {e}")))?
        .map_err(AppError::from)
}

pub async fn compare_password(plain: &str, hashed: &str) -> Result<bool> {
    let plain = plain.to_owned();
    let hashed = hashed.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hashed))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {e}")))?
        .map_err(AppError::from)
}
