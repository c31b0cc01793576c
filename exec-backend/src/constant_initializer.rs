use async_trait::async_trait;

use exec_ir::{LoweredGraph, OperandIndex};

use crate::Result;

/// Copies every constant operand's source data into the backend's own allocated storage. Must
/// run after `TensorBuilder::allocate` and before `release_data` is called on the source operand.
/// `owned_operands` is the list `BackendContext::initialize` computed for this backend.
#[async_trait(?Send)]
pub trait ConstantInitializer {
    async fn init_consts(&self, graph: &LoweredGraph, owned_operands: &[OperandIndex]) -> Result<()>;
}
