mod errors;
mod password;
mod storage;
mod types;

pub use errors::UserError;
pub(crate) use password::{hash_password, verify_password};
pub(crate) use storage::{DB_TABLE_USERS, UserStore};
pub use types::User;
pub(crate) use types::UserSearchField;

pub(crate) async fn init() -> Result<(), UserError> {
    UserStore::init().await
}
