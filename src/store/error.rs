use super::Id;

/// Errors from keyed store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// An entity with this identifier is already stored.
    #[error("duplicate key: an entity with id {id} already exists")]
    DuplicateKey { id: Id },

    /// An update closure changed the identifier of the entity it was given.
    #[error("identifier changed during update (expected {expected}, got {actual})")]
    IdentifierChanged { expected: Id, actual: Id },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
