//! Store - Id-keyed, insertion-ordered in-memory collections.
//!
//! A [`KeyedStore`] holds entities that expose a caller-assigned numeric
//! identifier through [`Identifiable`]. Each identifier appears at most once,
//! and enumeration always follows insertion order.
//!
//! ## Example
//!
//! ```ignore
//! use keyed_store::{Identifiable, KeyedStore, Repository};
//!
//! #[derive(Clone, Debug, Identifiable)]
//! struct Todo {
//!     id: u64,
//!     title: String,
//! }
//!
//! let mut todos = KeyedStore::new();
//! todos.add(Todo { id: 1, title: "write tests".into() })?;
//! assert_eq!(todos.get_by_id(1).map(|t| t.title.as_str()), Some("write tests"));
//! todos.remove(1);
//! assert!(todos.get_by_id(1).is_none());
//! ```

mod error;
mod keyed;
mod repository;

pub use error::{StoreError, StoreResult};
pub use keyed::KeyedStore;
pub use repository::{Count, Exists, Find, FindOne, Queryable, Repository};

/// Identifier type shared by every stored entity.
pub type Id = u64;

/// Trait for types that carry a unique, caller-assigned identifier.
///
/// The identifier is read-only from the store's point of view: it is read
/// once on insertion and must not change while the entity is stored.
/// Usually implemented with `#[derive(Identifiable)]`.
pub trait Identifiable {
    /// Returns the unique identifier for this entity.
    fn id(&self) -> Id;
}

impl<T: Identifiable + ?Sized> Identifiable for &T {
    fn id(&self) -> Id {
        (**self).id()
    }
}

impl<T: Identifiable + ?Sized> Identifiable for Box<T> {
    fn id(&self) -> Id {
        (**self).id()
    }
}
