use crate::error::AuthError;

/// Cost used outside tests. Tests pass `bcrypt::MIN_COST` to stay fast.
pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check a password against a stored hash. A mismatch is
/// [`AuthError::InvalidCredentials`].
pub fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    if bcrypt::verify(password, hash)? {
        Ok(())
    } else {
        Err(AuthError::InvalidCredentials)
    }
}
