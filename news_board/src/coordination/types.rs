//! Form and page types shared by the coordination functions and the HTTP layer

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::{Comment, News};
use crate::moderation::FIELD_REQUIRED;

/// Key for errors that do not belong to a single field
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages for one field, empty if it has none
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn non_field(&self) -> &[String] {
        self.field(NON_FIELD_ERRORS)
    }

    pub fn has(&self, field: &str) -> bool {
        !self.field(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

/// Comment submission or edit form
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
    #[serde(skip)]
    pub errors: FormErrors,
}

impl CommentForm {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            errors: FormErrors::new(),
        }
    }

    pub fn with_errors(mut self, errors: FormErrors) -> Self {
        self.errors = errors;
        self
    }
}

/// Account creation form
#[derive(Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
    #[serde(skip)]
    pub errors: FormErrors,
}

pub(crate) const USERNAME_MAX_LEN: usize = 150;
pub(crate) const PASSWORD_MIN_LEN: usize = 8;

impl SignupForm {
    /// Field-level checks; uniqueness of the username is checked against the store later
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        if self.username.is_empty() {
            errors.add("username", FIELD_REQUIRED);
        } else if self.username.chars().count() > USERNAME_MAX_LEN {
            errors.add(
                "username",
                format!("Ensure this value has at most {USERNAME_MAX_LEN} characters."),
            );
        } else if !self
            .username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
        {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }

        if self.password1.is_empty() {
            errors.add("password1", FIELD_REQUIRED);
        }
        if self.password2.is_empty() {
            errors.add("password2", FIELD_REQUIRED);
        } else if self.password1 != self.password2 {
            errors.add("password2", "The two password fields didn't match.");
        } else if self.password1.chars().count() < PASSWORD_MIN_LEN {
            errors.add(
                "password2",
                format!(
                    "This password is too short. It must contain at least {PASSWORD_MIN_LEN} characters."
                ),
            );
        }

        errors
    }

    /// Copy suitable for re-rendering: passwords are never sent back
    pub fn redisplay(&self, errors: FormErrors) -> Self {
        Self {
            username: self.username.clone(),
            errors,
            ..Self::default()
        }
    }
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("username", &self.username)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

/// Username and password login form
#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(skip)]
    pub errors: FormErrors,
}

impl LoginForm {
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        if self.username.is_empty() {
            errors.add("username", FIELD_REQUIRED);
        }
        if self.password.is_empty() {
            errors.add("password", FIELD_REQUIRED);
        }
        errors
    }

    pub fn redisplay(&self, errors: FormErrors) -> Self {
        Self {
            username: self.username.clone(),
            errors,
            ..Self::default()
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

/// Context of the home page
#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub object_list: Vec<News>,
}

/// Context of a news detail page
#[derive(Debug, Clone, Serialize)]
pub struct NewsDetailPage {
    pub object: News,
    pub comments: Vec<Comment>,
    /// Present only for authenticated requesters
    pub form: Option<CommentForm>,
}
