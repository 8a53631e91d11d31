//! Form validation with per-field error maps.
//!
//! A [`Form`] names its fields with a closed enum; [`FormErrors`] holds at
//! most one message per field, so every key is guaranteed to be a real
//! field of the form.

mod login;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

pub use login::{
    validate_login_form, LoginField, LoginForm, MIN_PASSWORD_LEN, PASSWORD_TOO_SHORT,
    USERNAME_REQUIRED,
};

/// A form whose fields are enumerated by `Field`.
pub trait Form {
    type Field: Copy + Ord + fmt::Debug + Serialize;
}

/// Types that can check themselves and report per-field errors.
pub trait Validate: Form + Sized {
    fn validate(&self) -> FormErrors<Self>;
}

/// Optional error message per field of `F`.
pub struct FormErrors<F: Form> {
    errors: BTreeMap<F::Field, String>,
}

impl<F: Form> FormErrors<F> {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Record a message for `field`, replacing any earlier one.
    pub fn set(&mut self, field: F::Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: F::Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = (F::Field, &str)> + '_ {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl<F: Form> Default for FormErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Form> Clone for FormErrors<F> {
    fn clone(&self) -> Self {
        Self {
            errors: self.errors.clone(),
        }
    }
}

impl<F: Form> PartialEq for FormErrors<F> {
    fn eq(&self, other: &Self) -> bool {
        self.errors == other.errors
    }
}

impl<F: Form> fmt::Debug for FormErrors<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.errors.iter()).finish()
    }
}

impl<F: Form> Serialize for FormErrors<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.errors.serialize(serializer)
    }
}
