use std::rc::Rc;

use exec_ir::{LoweredGraph, OpSequenceIndex};

use crate::{ExecutorMap, FunctionSequence, Result, TensorBuilder};

/// Generates a `FunctionSequence` for a single op-sequence.
pub trait KernelGenerator {
    fn generate(&self, graph: &LoweredGraph, op_seq: OpSequenceIndex) -> Result<FunctionSequence>;

    /// Capability query replacing a runtime downcast: returns `Some` only for the control-flow
    /// pseudo-backend's kernel generator, which needs the tensor-builder registry and the shared
    /// executor map to emit kernels that invoke sibling subgraphs.
    fn as_control_flow(&self) -> Option<&dyn ControlFlowKernelGenerator> {
        None
    }
}

pub trait ControlFlowKernelGenerator: KernelGenerator {
    fn set_tensor_builders(&self, builders: Vec<Rc<dyn TensorBuilder>>);
    fn set_executor_map(&self, executor_map: ExecutorMap);
}
