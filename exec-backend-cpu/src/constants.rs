use std::rc::Rc;

use async_trait::async_trait;
use exec_backend::{ConstantInitializer, Result};
use exec_ir::{LoweredGraph, OperandIndex};

use crate::builder::CpuTensorBuilder;

pub struct CpuConstantInitializer {
    builder: Rc<CpuTensorBuilder>,
}

impl CpuConstantInitializer {
    pub fn new(builder: Rc<CpuTensorBuilder>) -> Self {
        Self { builder }
    }
}

#[async_trait(?Send)]
impl ConstantInitializer for CpuConstantInitializer {
    async fn init_consts(&self, graph: &LoweredGraph, owned_operands: &[OperandIndex]) -> Result<()> {
        for &operand in owned_operands {
            let data = graph.operand(operand);
            if !data.is_constant {
                continue;
            }
            if let (Some(bytes), Some(tensor)) = (data.source_data(), self.builder.native_tensor(operand)) {
                tensor.set_bytes(bytes);
            }
        }
        Ok(())
    }
}
