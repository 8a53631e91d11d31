use super::error::StoreResult;
use super::{Id, Identifiable};

/// CRUD access to a collection of identifiable entities.
pub trait Repository<T: Identifiable> {
    /// Every stored entity, in insertion order.
    fn get_all(&self) -> &[T];

    /// The entity with the given id. Returns None if not found.
    fn get_by_id(&self, id: Id) -> Option<&T>;

    /// Append an entity. Fails if its id is already stored.
    fn add(&mut self, item: T) -> StoreResult<()>;

    /// Remove the entity with the given id, returning it if it existed.
    /// Removing a missing id is a no-op.
    fn remove(&mut self, id: Id) -> Option<T>;
}

/// Find all entities matching a predicate.
pub trait Find<T> {
    fn find<F>(&self, predicate: F) -> Vec<&T>
    where
        F: Fn(&T) -> bool;
}

/// Find the first entity matching a predicate.
pub trait FindOne<T> {
    fn find_one<F>(&self, predicate: F) -> Option<&T>
    where
        F: Fn(&T) -> bool;
}

/// Check if any entity matches a predicate.
pub trait Exists<T> {
    fn exists<F>(&self, predicate: F) -> bool
    where
        F: Fn(&T) -> bool;
}

/// Count entities matching a predicate.
pub trait Count<T> {
    fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool;
}

/// Read-side query capabilities combined.
pub trait Queryable<T>: Find<T> + FindOne<T> + Exists<T> + Count<T> {}

// Blanket implementation: anything implementing all query traits is Queryable
impl<T, S> Queryable<T> for S where S: Find<T> + FindOne<T> + Exists<T> + Count<T> {}
