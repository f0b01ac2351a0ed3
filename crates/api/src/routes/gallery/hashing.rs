use bcrypt::{DEFAULT_COST, hash, verify};

/// Hash a gallery password using bcrypt.
/// # Errors
///
/// * `bcrypt::hash` can return an error if the cost parameter is invalid.
pub fn hash_password(password: &str) -> color_eyre::Result<String> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Verify a gallery password candidate against a stored bcrypt hash.
/// # Errors
///
/// * `bcrypt::verify` can return an error if the stored hash is malformed.
pub fn verify_password(password: &str, hashed: &str) -> color_eyre::Result<bool> {
    Ok(verify(password, hashed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hash(password: &str) -> String {
        // Minimum cost keeps the test fast; verification is cost-agnostic.
        bcrypt::hash(password, 4).unwrap()
    }

    #[test]
    fn matching_password_verifies() {
        let hashed = cheap_hash("sunset-2026");
        assert!(verify_password("sunset-2026", &hashed).unwrap());
    }

    #[test]
    fn near_matches_and_empty_fail_identically() {
        let hashed = cheap_hash("sunset-2026");
        for candidate in ["sunset-2027", "Sunset-2026", "sunset-2026 ", ""] {
            assert!(!verify_password(candidate, &hashed).unwrap());
        }
    }

    #[test]
    fn malformed_hash_is_an_error_not_a_match() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
