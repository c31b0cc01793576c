use std::rc::Rc;

use anyhow::anyhow;
use exec_backend::{FunctionSequence, KernelGenerator, Result};
use exec_ir::{LoweredGraph, OpCode, OpSequenceIndex};

use crate::builder::CpuTensorBuilder;
use crate::kernels::{BinaryFunction, ReluFunction};

pub struct CpuKernelGenerator {
    builder: Rc<CpuTensorBuilder>,
}

impl CpuKernelGenerator {
    pub fn new(builder: Rc<CpuTensorBuilder>) -> Self {
        Self { builder }
    }
}

impl KernelGenerator for CpuKernelGenerator {
    fn generate(&self, graph: &LoweredGraph, op_seq: OpSequenceIndex) -> Result<FunctionSequence> {
        let mut sequence = FunctionSequence::default();
        for op in &graph.op_sequence(op_seq).operations {
            let inputs: Vec<_> = op.defined_inputs().collect();
            let function: Box<dyn exec_backend::Function> = match &op.op_code {
                OpCode::Add => Box::new(BinaryFunction::add(self.builder.clone(), inputs[0], inputs[1], op.outputs[0])),
                OpCode::Sub => Box::new(BinaryFunction::sub(self.builder.clone(), inputs[0], inputs[1], op.outputs[0])),
                OpCode::Mul => Box::new(BinaryFunction::mul(self.builder.clone(), inputs[0], inputs[1], op.outputs[0])),
                OpCode::Relu => Box::new(ReluFunction::new(self.builder.clone(), inputs[0], op.outputs[0])),
                other => return Err(anyhow!("cpu backend cannot generate a kernel for {other:?}").into()),
            };
            sequence.push(function);
        }
        Ok(sequence)
    }
}
