use crate::{Id, StoreError};

/// Errors from user directory operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unknown user: {0}")]
    UnknownUser(Id),

    #[error("unknown role: {0}")]
    UnknownRole(Id),

    #[error("unknown permission: {0}")]
    UnknownPermission(Id),
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
