use exec_ir::{LoweredGraph, OpSequenceIndex};

use crate::Result;

/// A backend may supply a custom tensor register to take over registration for an entire
/// op-sequence instead of going through the factory's default union-of-inputs-and-outputs walk.
/// Backends that need this typically have operands with more than one def-factor, which the
/// default path rejects.
pub trait TensorRegister {
    fn register_tensors(&self, graph: &LoweredGraph, op_seq: OpSequenceIndex) -> Result<()>;
}
