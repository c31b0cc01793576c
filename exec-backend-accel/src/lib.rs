//! A second backend, distinct in layout (NCHW) and tensor portability (non-portable) from the
//! CPU backend, used to exercise cross-backend migrant-tensor wiring end to end.

mod builder;
mod config;
mod constants;
mod kernel_generator;
mod optimizer;
mod tensor;

use std::rc::Rc;

use exec_backend::{BackendContext, Result};
use exec_ir::BackendId;

pub use builder::AccelTensorBuilder;
pub use tensor::AccelTensor;

pub const BACKEND: BackendId = BackendId("accel");

pub fn context() -> Result<BackendContext> {
    context_with_builder(Rc::new(AccelTensorBuilder::new()))
}

/// Same as `context`, but around a caller-supplied builder — see `exec_backend_cpu`'s equivalent
/// for why a caller might want the concrete handle back.
pub fn context_with_builder(builder: Rc<AccelTensorBuilder>) -> Result<BackendContext> {
    tracing::debug!("constructing accel backend context");
    let optimizer = Rc::new(optimizer::AccelOptimizer);
    let constant_initializer = Rc::new(constants::AccelConstantInitializer::new(builder.clone()));
    let kernel_generator = Rc::new(kernel_generator::AccelKernelGenerator::new(builder.clone()));
    let config = Rc::new(config::AccelConfig);
    Ok(BackendContext::new(BACKEND, config, Some(optimizer), constant_initializer, kernel_generator, None, builder))
}
