use std::rc::Rc;

use anyhow::anyhow;
use exec_backend::{Error, Function, FunctionSequence, KernelGenerator, Result, TensorBuilder};
use exec_ir::{LoweredGraph, OpCode, OpSequenceIndex};

use crate::builder::AccelTensorBuilder;

/// A minimal elementwise kernel that copies bytes through unchanged, standing in for a real
/// accelerator library. Individual backend kernel implementations are out of this crate's scope;
/// this exists only to let the accelerator backend own an op-sequence and exercise migrant-tensor
/// wiring end to end, including reading a tensor it did not itself produce.
struct PassthroughFunction {
    builder: Rc<AccelTensorBuilder>,
    input: exec_ir::OperandIndex,
    out: exec_ir::OperandIndex,
}

impl Function for PassthroughFunction {
    fn prepare(&self) -> Result<()> {
        Ok(())
    }

    fn run(&self) -> Result<()> {
        let input = self.builder.tensor_at(self.input).ok_or(Error::MissingTensor(self.input))?;
        let out = self.builder.tensor_at(self.out).ok_or(Error::MissingTensor(self.out))?;
        out.write_bytes(input.read_bytes());
        Ok(())
    }
}

pub struct AccelKernelGenerator {
    builder: Rc<AccelTensorBuilder>,
}

impl AccelKernelGenerator {
    pub fn new(builder: Rc<AccelTensorBuilder>) -> Self {
        Self { builder }
    }
}

impl KernelGenerator for AccelKernelGenerator {
    fn generate(&self, graph: &LoweredGraph, op_seq: OpSequenceIndex) -> Result<FunctionSequence> {
        let mut sequence = FunctionSequence::default();
        for op in &graph.op_sequence(op_seq).operations {
            let inputs: Vec<_> = op.defined_inputs().collect();
            let function: Box<dyn Function> = match &op.op_code {
                OpCode::Relu | OpCode::Cast(_) => {
                    Box::new(PassthroughFunction { builder: self.builder.clone(), input: inputs[0], out: op.outputs[0] })
                }
                other => return Err(anyhow!("accel backend cannot generate a kernel for {other:?}").into()),
            };
            sequence.push(function);
        }
        Ok(sequence)
    }
}
