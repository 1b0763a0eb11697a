pub mod fixtures;
pub mod mock_browser;

pub use fixtures::*;
pub use mock_browser::MockBrowser;

use std::sync::Once;

/// Load `.env_test` once, start from an empty database and initialize the stores
pub async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        if let Ok(url) = std::env::var("GENERIC_DATA_STORE_URL") {
            if let Some(path) = url.strip_prefix("sqlite:").filter(|p| !p.contains("memory")) {
                // Missing file is fine
                let _ = std::fs::remove_file(path);
            }
        }
    });

    news_board_axum::init()
        .await
        .expect("Failed to initialize stores");
}
