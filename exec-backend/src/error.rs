use thiserror::Error;

use exec_ir::OperandIndex;

#[derive(Debug, Error)]
pub enum Error {
    #[error("graph invariant violated: {0}")]
    GraphInvariant(#[from] exec_ir::Error),

    #[error("unknown executor strategy: {0}")]
    UnknownStrategy(String),

    #[error("inconsistent factory configuration: {0}")]
    Configuration(String),

    #[error("tensor builder has no tensor for operand {0:?} after external wiring")]
    MissingTensor(OperandIndex),

    #[error("operand {0:?} produced by a foreign backend is not portable and cannot be wired as a migrant tensor")]
    NotPortable(OperandIndex),

    #[error("backend operation failed: {0}")]
    BackendOperation(#[from] anyhow::Error),
}
