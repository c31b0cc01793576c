use thiserror::Error;

use exec_ir::BackendId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("graph invariant violated: {0}")]
    GraphInvariant(#[from] exec_ir::Error),

    #[error(transparent)]
    Backend(#[from] exec_backend::Error),

    #[error("unknown executor strategy: {0}")]
    UnknownStrategy(String),

    #[error("inconsistent factory configuration: {0}")]
    Configuration(String),

    #[error("no backend context registered for backend {0}")]
    MissingBackendContext(BackendId),
}

pub type Result<T> = std::result::Result<T, Error>;
