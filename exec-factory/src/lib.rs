//! Constructs a ready-to-run `Executor` (Linear, Dataflow, or Parallel) from a `LoweredGraph`
//! whose operands and op-sequences have already been partitioned across backends, by driving
//! tensor registration, memory planning, kernel generation, external-tensor wiring, and observer
//! attachment through the fixed phase order each strategy's build function implements.

mod config;
mod error;
mod executors;
mod factory;
mod io_tensors;
mod kernelgen;
mod observers;
mod registration;
mod wiring;

pub use config::CompilerOptions;
pub use error::Error;
pub use executors::{
    create_dataflow_executor, create_linear_executor, create_parallel_executor, DataflowExecutor, LinearExecutor, ParallelExecutor,
};
pub use factory::ExecutorFactory;
pub use observers::{ProfileObserver, TracingObserver};

pub type Result<T> = std::result::Result<T, Error>;
