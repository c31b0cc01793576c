//! A CPU backend for the executor factory. Deliberately simple: it exists to give the factory a
//! real backend to register tensors against, generate a small set of real elementwise kernels,
//! and prove the pipeline actually runs, not to be a competitive numeric implementation.

mod builder;
mod config;
mod constants;
mod kernel_generator;
mod kernels;
mod optimizer;
mod tensor;

use std::rc::Rc;

use exec_backend::{BackendContext, Result};
use exec_ir::BackendId;

pub use builder::CpuTensorBuilder;
pub use tensor::CpuTensor;

pub const BACKEND: BackendId = BackendId("cpu");

/// Builds a fresh `BackendContext` for the CPU backend. The tensor register is left unset so the
/// factory's default tensor-registration policy applies.
pub fn context() -> Result<BackendContext> {
    context_with_builder(Rc::new(CpuTensorBuilder::new()))
}

/// Same as `context`, but around a caller-supplied builder. Lets a caller keep a concrete
/// `Rc<CpuTensorBuilder>` handle alongside the type-erased one the returned context stores, for
/// introspection the generic `TensorBuilder` trait does not expose (e.g. reading back a computed
/// tensor's value).
pub fn context_with_builder(builder: Rc<CpuTensorBuilder>) -> Result<BackendContext> {
    tracing::debug!("constructing cpu backend context");
    let optimizer = Rc::new(optimizer::CpuOptimizer);
    let constant_initializer = Rc::new(constants::CpuConstantInitializer::new(builder.clone()));
    let kernel_generator = Rc::new(kernel_generator::CpuKernelGenerator::new(builder.clone()));
    let config = Rc::new(config::CpuConfig);
    Ok(BackendContext::new(BACKEND, config, Some(optimizer), constant_initializer, kernel_generator, None, builder))
}
