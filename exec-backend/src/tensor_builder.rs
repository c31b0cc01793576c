use std::rc::Rc;

use exec_ir::OperandIndex;

use crate::{MemoryPolicy, OperandInfo, Result, Tensor};

/// Owns a backend's tensor registry: tensors are registered (metadata), prepared (memory plan),
/// allocated (physical memory), and then the builder enters post-function-prepare state.
///
/// Invariant: no tensor may be allocated before registration; constants must be initialized
/// after allocation and before any kernel runs.
pub trait TensorBuilder {
    fn is_registered(&self, operand: OperandIndex) -> bool;

    fn register_tensor_info(&self, operand: OperandIndex, info: OperandInfo) -> Result<()>;

    fn tensor_at(&self, operand: OperandIndex) -> Option<Rc<dyn Tensor>>;

    /// Installs a tensor owned by a foreign backend as a read-only migrant tensor. The tensor
    /// must be portable; non-portable tensors cannot cross backends.
    fn set_migrant_tensor(&self, operand: OperandIndex, tensor: Rc<dyn Tensor>) -> Result<()>;

    /// Marks an operand as used from the start of execution, widening its planned lifetime to
    /// the whole run. Used by the dataflow/parallel memory policy.
    fn notify_first_use(&self, operand: OperandIndex);

    fn prepare(&self, policy: MemoryPolicy) -> Result<()>;

    fn allocate(&self) -> Result<()>;

    fn post_function_prepare(&self) -> Result<()>;
}
