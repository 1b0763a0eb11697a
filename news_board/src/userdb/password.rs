//! Salted PBKDF2-HMAC-SHA256 password hashes
//!
//! Stored format: `pbkdf2_sha256$<iterations>$<salt>$<hash>` with base64url
//! salt and hash, so the iteration count can be raised without invalidating
//! existing accounts.

use std::num::NonZeroU32;
use std::sync::LazyLock;

use ring::pbkdf2;

use crate::utils::{UtilError, base64url_decode, base64url_encode, gen_random_bytes};

const ALGORITHM_TAG: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;
const DEFAULT_ITERATIONS: NonZeroU32 = NonZeroU32::new(600_000).unwrap();

static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

pub(crate) static PASSWORD_HASH_ITERATIONS: LazyLock<NonZeroU32> = LazyLock::new(|| {
    std::env::var("PASSWORD_HASH_ITERATIONS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .and_then(NonZeroU32::new)
        .unwrap_or(DEFAULT_ITERATIONS)
});

/// Hash a password with a fresh random salt
///
/// Key derivation runs on the blocking pool so the calling worker keeps
/// serving other requests.
pub(crate) async fn hash_password(password: &str) -> Result<String, UtilError> {
    hash_password_off_runtime(password, *PASSWORD_HASH_ITERATIONS).await
}

async fn hash_password_off_runtime(
    password: &str,
    iterations: NonZeroU32,
) -> Result<String, UtilError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash_password_with(&password, iterations))
        .await
        .map_err(|e| UtilError::Crypto(format!("Password hashing task failed: {e}")))?
}

/// Check a password against a stored hash without blocking the runtime
pub(crate) async fn verify_password(password: &str, stored: &str) -> bool {
    let (password, stored) = (password.to_string(), stored.to_string());
    match tokio::task::spawn_blocking(move || check_password(&password, &stored)).await {
        Ok(matched) => matched,
        Err(e) => {
            tracing::error!("Password verification task failed: {}", e);
            false
        }
    }
}

fn hash_password_with(password: &str, iterations: NonZeroU32) -> Result<String, UtilError> {
    let salt = gen_random_bytes(SALT_LEN)?;
    let mut hash = [0u8; HASH_LEN];
    pbkdf2::derive(PBKDF2_ALG, iterations, &salt, password.as_bytes(), &mut hash);

    Ok(format!(
        "{ALGORITHM_TAG}${iterations}${}${}",
        base64url_encode(&salt),
        base64url_encode(&hash)
    ))
}

/// Check a password against a stored hash in constant time
///
/// Malformed stored hashes never verify.
fn check_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(tag), Some(iterations), Some(salt), Some(hash), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        tracing::warn!("Malformed password hash");
        return false;
    };

    if tag != ALGORITHM_TAG {
        tracing::warn!("Unsupported password hash algorithm: {}", tag);
        return false;
    }

    let Some(iterations) = iterations.parse::<u32>().ok().and_then(NonZeroU32::new) else {
        return false;
    };
    let (Ok(salt), Ok(hash)) = (base64url_decode(salt), base64url_decode(hash)) else {
        return false;
    };

    pbkdf2::verify(PBKDF2_ALG, iterations, &salt, password.as_bytes(), &hash).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn fast() -> NonZeroU32 {
        NonZeroU32::new(10).unwrap()
    }

    #[test]
    fn test_hash_format() {
        let stored = hash_password_with("correct horse", fast()).unwrap();
        let parts: Vec<&str> = stored.split('$').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "pbkdf2_sha256");
        assert_eq!(parts[1], "10");
        assert_eq!(base64url_decode(parts[2]).unwrap().len(), SALT_LEN);
        assert_eq!(base64url_decode(parts[3]).unwrap().len(), HASH_LEN);
    }

    #[test]
    fn test_check_password() {
        let stored = hash_password_with("correct horse", fast()).unwrap();
        assert!(check_password("correct horse", &stored));
        assert!(!check_password("correct horse ", &stored));
        assert!(!check_password("", &stored));
    }

    #[test]
    fn test_salt_differs_per_hash() {
        let a = hash_password_with("same", fast()).unwrap();
        let b = hash_password_with("same", fast()).unwrap();
        assert_ne!(a, b);
        assert!(check_password("same", &a));
        assert!(check_password("same", &b));
    }

    #[test]
    fn test_malformed_hashes_never_verify() {
        for stored in [
            "",
            "plain",
            "md5$10$abc$def",
            "pbkdf2_sha256$0$abc$def",
            "pbkdf2_sha256$ten$abc$def",
            "pbkdf2_sha256$10$!!$def",
            "pbkdf2_sha256$10$abc$def$extra",
        ] {
            assert!(!check_password("pw", stored), "{stored} should not verify");
        }
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let stored = hash_password_off_runtime("correct horse", fast()).await.unwrap();
        assert!(verify_password("correct horse", &stored).await);
        assert!(!verify_password("wrong horse", &stored).await);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_hashing_leaves_runtime_responsive() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let ticker = tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(1)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        tokio::task::yield_now().await;

        let iterations = NonZeroU32::new(200_000).unwrap();
        let before = ticks.load(Ordering::SeqCst);
        let stored = hash_password_off_runtime("correct horse", iterations)
            .await
            .unwrap();
        let after_hash = ticks.load(Ordering::SeqCst);
        assert!(verify_password("correct horse", &stored).await);
        let after_verify = ticks.load(Ordering::SeqCst);
        ticker.abort();

        assert!(after_hash > before, "runtime stalled while hashing");
        assert!(after_verify > after_hash, "runtime stalled while verifying");
    }
}
