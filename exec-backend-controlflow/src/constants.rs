use std::rc::Rc;

use async_trait::async_trait;
use exec_backend::{ConstantInitializer, Result, Tensor};
use exec_ir::{LoweredGraph, OperandIndex};

use crate::builder::ControlFlowTensorBuilder;

/// Model-level IO tensors and `If` condition operands are never themselves constants, but an
/// operand partitioned onto this backend for some other reason still goes through the same
/// initialization pass as every other backend, so this mirrors the others rather than being a
/// silent no-op.
pub struct ControlFlowConstantInitializer {
    builder: Rc<ControlFlowTensorBuilder>,
}

impl ControlFlowConstantInitializer {
    pub fn new(builder: Rc<ControlFlowTensorBuilder>) -> Self {
        Self { builder }
    }
}

#[async_trait(?Send)]
impl ConstantInitializer for ControlFlowConstantInitializer {
    async fn init_consts(&self, graph: &LoweredGraph, owned_operands: &[OperandIndex]) -> Result<()> {
        for &operand in owned_operands {
            let data = graph.operand(operand);
            if !data.is_constant {
                continue;
            }
            if let (Some(bytes), Some(tensor)) = (data.source_data(), self.builder.native_tensor(operand)) {
                tensor.write_bytes(bytes);
            }
        }
        Ok(())
    }
}
