use thiserror::Error;

use crate::{BackendId, OpSequenceIndex, OperandIndex};

#[derive(Debug, Error)]
pub enum Error {
    #[error("operand {0:?} has no def-factor")]
    MissingDefFactor(OperandIndex),

    #[error("operand {0:?} has {1} def-factors; a custom tensor register is required")]
    AmbiguousDefFactor(OperandIndex, usize),

    #[error("op-sequence {0:?} has no lower-info")]
    MissingOpSeqLowerInfo(OpSequenceIndex),

    #[error("op-sequence graph contains a cycle ({0} of {1} op-sequences ordered)")]
    CyclicGraph(usize, usize),

    #[error("unknown backend {0}")]
    UnknownBackend(BackendId),
}
