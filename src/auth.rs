use bcrypt::{BcryptError, DEFAULT_COST};

/// Salted bcrypt hash of `password`, in the `$2b$...` string form stored in
/// the `password_hash` columns.
pub fn hash(password: &str) -> Result<String, BcryptError> {
    bcrypt::hash(password, DEFAULT_COST)
}

/// Check `password` against a stored hash. A stored value that is not a valid
/// bcrypt hash never verifies.
pub fn verify(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Stored password hash could not be checked: {}", e);
            false
        }
    }
}
