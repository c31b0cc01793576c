//! The lowered computation graph: operands, operations grouped into op-sequences, and the
//! per-backend lower-info that tells the executor factory where each piece of the graph lives.
//!
//! This crate owns no backend logic. It is the data the factory consumes and the one place that
//! knows how to linearize an op-sequence graph into a total order.

mod error;
mod graph;
mod ids;
mod layout;
mod lower_info;
mod operand;
mod operation;

pub use error::Error;
pub use graph::LoweredGraph;
pub use ids::{BackendId, OpSequenceIndex, OperandIndex, OperationIndex, SubgraphId};
pub use layout::{permute_shape, Layout};
pub use lower_info::{DefFactor, LowerInfoOpSeq, LowerInfoOperand};
pub use operand::{MemAllocClass, Operand};
pub use operation::{OpCode, OpSequence, Operation};

pub type Result<T> = std::result::Result<T, Error>;
