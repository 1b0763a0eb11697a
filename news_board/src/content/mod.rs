//! News items and their comments

mod errors;
mod storage;
mod types;

pub use errors::ContentError;
pub use storage::{CommentStore, NewsStore};
pub use types::{Comment, News};

pub(crate) async fn init() -> Result<(), ContentError> {
    NewsStore::init().await
}
