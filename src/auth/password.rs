use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

const SCHEME: &str = "pbkdf2_sha256";
const KEY_LEN: usize = 32;

pub const DEFAULT_ITERATIONS: u32 = 600_000;

fn derive(password: &str, salt: &str, iterations: u32) -> String {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut key);
    key.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Hashes a password as `pbkdf2_sha256$<iterations>$<salt>$<hex key>` with a
/// fresh random salt.
pub fn hash_password(password: &str, iterations: u32) -> String {
    let iterations = iterations.max(1);
    let salt = Uuid::new_v4().simple().to_string();
    format!(
        "{}${}${}${}",
        SCHEME,
        iterations,
        salt,
        derive(password, &salt, iterations)
    )
}

/// Verifies against the iteration count recorded in the stored hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(4, '$');
    let (Some(SCHEME), Some(iterations), Some(salt), Some(expected)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let iterations = match iterations.parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => return false,
    };

    let computed = derive(password, salt, iterations);
    computed.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITERATIONS: u32 = 1_000;

    #[test]
    fn test_hash_and_verify() {
        let stored = hash_password("password123", ITERATIONS);
        assert!(stored.starts_with("pbkdf2_sha256$1000$"));
        assert!(verify_password("password123", &stored));
        assert!(!verify_password("password124", &stored));
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        assert_ne!(
            hash_password("password123", ITERATIONS),
            hash_password("password123", ITERATIONS)
        );
    }

    #[test]
    fn test_iteration_count_is_read_from_hash() {
        let stored = hash_password("password123", 2_000);
        assert!(verify_password("password123", &stored));

        let tampered = stored.replacen("$2000$", "$1000$", 1);
        assert!(!verify_password("password123", &tampered));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("password123", "password123"));
        assert!(!verify_password("password123", "sha256$salt$abc"));
        assert!(!verify_password("password123", "pbkdf2_sha256$0$salt$abc"));
        assert!(!verify_password("password123", "pbkdf2_sha256$many$salt$abc"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn test_zero_iterations_are_raised_to_one() {
        let stored = hash_password("password123", 0);
        assert!(stored.starts_with("pbkdf2_sha256$1$"));
        assert!(verify_password("password123", &stored));
    }
}
