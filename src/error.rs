use thiserror::Error;

/// Result type alias for fallible `Acl` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors reported by the fallible lookup and `try_*` operations. Keys are rendered with their
/// `Debug` representation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("Missing role: {0}")]
    MissingRole(String),
    #[error("Missing resource: {0}")]
    MissingResource(String),
    #[error("Missing parent role: {0}")]
    MissingParentRole(String),
    #[error("Missing parent resource: {0}")]
    MissingParentResource(String),
} // enum Error
