//! The backend trait family the executor factory builds against: a `BackendContext` bundles an
//! `Optimizer`, a `ConstantInitializer`, a `KernelGenerator`, an optional `TensorRegister`, and a
//! `TensorBuilder`. Concrete backends (`exec-backend-cpu`, `exec-backend-accel`,
//! `exec-backend-controlflow`) implement these traits; the factory only ever sees trait objects.

mod config;
mod constant_initializer;
mod context;
mod error;
mod executor;
mod function;
mod kernel_generator;
mod memory_policy;
mod operand_info;
mod optimizer;
mod tensor;
mod tensor_builder;
mod tensor_register;

pub use config::BackendConfig;
pub use constant_initializer::ConstantInitializer;
pub use context::BackendContext;
pub use error::Error;
pub use executor::{Executor, ExecutorMap, Observer};
pub use function::{Function, FunctionSequence, SyncFunction};
pub use kernel_generator::{ControlFlowKernelGenerator, KernelGenerator};
pub use memory_policy::MemoryPolicy;
pub use operand_info::OperandInfo;
pub use optimizer::Optimizer;
pub use tensor::Tensor;
pub use tensor_builder::TensorBuilder;
pub use tensor_register::TensorRegister;

pub type Result<T> = std::result::Result<T, Error>;
