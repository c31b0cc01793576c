//! The control-flow pseudo-backend: owns model-level IO tensors (`UserTensor`) and generates the
//! kernels for `If` operations, which need to read a condition tensor from any backend and invoke
//! whichever nested subgraph's executor it selects. It performs no numeric compute of its own.

mod builder;
mod config;
mod constants;
mod kernel_generator;
mod optimizer;
mod user_tensor;

use std::rc::Rc;

use exec_backend::{BackendContext, Result};
use exec_ir::BackendId;

pub use builder::ControlFlowTensorBuilder;
pub use kernel_generator::ControlFlowKernelGeneratorImpl;
pub use user_tensor::UserTensor;

pub const BACKEND: BackendId = BackendId("controlflow");

/// Builds a fresh `BackendContext` for the control-flow backend around the given tensor builder.
/// Takes the builder rather than constructing its own so that the caller can hold onto the same
/// `Rc<ControlFlowTensorBuilder>` to drive IO tensor initialization (`register_user_tensor`,
/// `record_input`/`record_output`) independently of the generic `TensorBuilder` trait object
/// stored in this context. The factory calls `set_tensor_builders`/`set_executor_map` on the
/// returned context's kernel generator (via `KernelGenerator::as_control_flow`) once every other
/// backend context exists.
pub fn context(builder: Rc<ControlFlowTensorBuilder>) -> Result<BackendContext> {
    tracing::debug!("constructing control-flow backend context");
    let optimizer = Rc::new(optimizer::ControlFlowOptimizer);
    let constant_initializer = Rc::new(constants::ControlFlowConstantInitializer::new(builder.clone()));
    let kernel_generator = Rc::new(ControlFlowKernelGeneratorImpl::new(builder.clone()));
    let config = Rc::new(config::ControlFlowConfig);
    Ok(BackendContext::new(BACKEND, config, Some(optimizer), constant_initializer, kernel_generator, None, builder))
}
