//! Shared test setup
//!
//! SQLite functions create their tables at the point of use, so setup only
//! loads `.env_test`, removes the previous run's database file and
//! initializes the stores.

use std::sync::Once;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::userdb::{User, UserStore, hash_password};

/// Load the test environment once and initialize all stores
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        if let Some(db_path) = extract_sqlite_file_path() {
            // Missing file is fine
            let _ = std::fs::remove_file(&db_path);
        }
    });

    if let Err(e) = crate::init().await {
        eprintln!("Warning: Failed to initialize stores: {e}");
    }
}

/// Suffix that keeps names unique across tests sharing one database
pub fn unique_suffix() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}{count}", chrono::Utc::now().timestamp_micros())
}

/// Insert a user with the password `password123`
pub async fn create_test_user(prefix: &str) -> User {
    let suffix = unique_suffix();
    let user = User::new(
        format!("test-user-{prefix}-{suffix}"),
        format!("{prefix}-{suffix}"),
        hash_password("password123")
            .await
            .expect("hash test password"),
    );
    UserStore::create_user(user)
        .await
        .expect("Failed to create test user")
}

fn extract_sqlite_file_path() -> Option<String> {
    std::env::var("GENERIC_DATA_STORE_URL")
        .ok()
        .and_then(|url| extract_sqlite_file_path_from_url(&url))
}

/// File behind a `sqlite:` URL; None for in-memory and non-SQLite URLs
fn extract_sqlite_file_path_from_url(url: &str) -> Option<String> {
    let path = url.strip_prefix("sqlite:")?;
    let path = path.strip_prefix("file:").unwrap_or(path);
    let path = path.strip_prefix("//").unwrap_or(path);
    let path = path.split('?').next()?;

    if path.is_empty() || path.contains(":memory:") || url.contains("mode=memory") {
        return None;
    }
    Some(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sqlite_file_path_from_url() {
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:/tmp/test.db"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:./test.db"),
            Some("./test.db".to_string())
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:file:/tmp/test.db?mode=rwc"),
            Some("/tmp/test.db".to_string())
        );
        assert_eq!(extract_sqlite_file_path_from_url("sqlite::memory:"), None);
        assert_eq!(
            extract_sqlite_file_path_from_url("sqlite:file:news_board?mode=memory&cache=shared"),
            None
        );
        assert_eq!(
            extract_sqlite_file_path_from_url("postgresql://localhost/db"),
            None
        );
    }
}
