use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Form, FormErrors, Validate};

pub const MIN_PASSWORD_LEN: usize = 6;

pub const USERNAME_REQUIRED: &str = "username must not be empty";
pub const PASSWORD_TOO_SHORT: &str = "password must be at least 6 characters";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginField {
    Username,
    Password,
}

impl Form for LoginForm {
    type Field = LoginField;
}

impl Validate for LoginForm {
    /// Both rules are checked, so one call can report both fields.
    /// Password length counts characters, not bytes.
    fn validate(&self) -> FormErrors<Self> {
        let mut errors = FormErrors::new();

        if self.username.is_empty() {
            errors.set(LoginField::Username, USERNAME_REQUIRED);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.set(LoginField::Password, PASSWORD_TOO_SHORT);
        }

        debug!(errors = errors.len(), "login form validated");
        errors
    }
}

/// Validate a login form. An empty result means the form is valid.
pub fn validate_login_form(form: &LoginForm) -> FormErrors<LoginForm> {
    form.validate()
}
