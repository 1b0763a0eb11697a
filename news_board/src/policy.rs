//! Who may see the comment form and who may change a comment

use crate::content::Comment;

/// Only authenticated requesters get a comment form
pub fn can_submit_comment(is_authenticated: bool) -> bool {
    is_authenticated
}

/// Result of an ownership check.
///
/// A non-owner gets `NotFound`, so the response cannot be told apart from a
/// comment that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    NotFound,
}

pub fn can_modify(comment: &Comment, user_id: &str) -> Access {
    if comment.author_id == user_id {
        Access::Allowed
    } else {
        Access::NotFound
    }
}
