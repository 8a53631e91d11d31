//! Generic, id-keyed in-memory repositories for plain Rust structs.
//!
//! The core is [`KeyedStore`], an insertion-ordered collection of
//! [`Identifiable`] entities with unique ids, accessed through the
//! [`Repository`] trait. Small toolkits built on it live alongside: a
//! user/role directory, per-environment app config, and login form
//! validation.

// Lets `#[derive(Identifiable)]` expand to `::keyed_store::...` inside this crate too.
extern crate self as keyed_store;

pub mod config;
pub mod form;
mod store;
pub mod user;

pub use config::{create_app_config, AppConfig, ConfigError, Env};
pub use form::{validate_login_form, Form, FormErrors, LoginField, LoginForm, Validate};
pub use store::{
    Count, Exists, Find, FindOne, Id, Identifiable, KeyedStore, Queryable, Repository,
    StoreError, StoreResult,
};
pub use user::{
    ApiResponse, DirectoryError, Permission, Role, User, UserDetail, UserDetailResponse,
    UserDirectory, UserListResponse,
};

// Re-export the derive macro under the trait's name
pub use keyed_store_macros::Identifiable;
