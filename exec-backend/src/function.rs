use std::rc::Rc;

use crate::{BackendConfig, Result};

/// A single runnable unit of kernel code, one per op-sequence. `prepare` is called once, after
/// every tensor builder has allocated and every backend has initialized its constants; `run`
/// executes the kernel.
pub trait Function {
    fn prepare(&self) -> Result<()>;
    fn run(&self) -> Result<()>;
}

/// An ordered, composable list of functions, one per op-sequence in linearized order. Supports
/// wrapping every element in a decorator — the profiling sync-barrier is the canonical example.
#[derive(Default)]
pub struct FunctionSequence {
    functions: Vec<Box<dyn Function>>,
}

impl FunctionSequence {
    pub fn new(functions: Vec<Box<dyn Function>>) -> Self {
        Self { functions }
    }

    pub fn push(&mut self, function: Box<dyn Function>) {
        self.functions.push(function);
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Function> {
        self.functions.iter().map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Runs `prepare` on every contained function, in order.
    pub fn prepare_all(&self) -> Result<()> {
        self.functions.iter().try_for_each(|f| f.prepare())
    }

    /// Runs every contained function, in order.
    pub fn run_all(&self) -> Result<()> {
        self.functions.iter().try_for_each(|f| f.run())
    }

    /// Consumes the sequence, wrapping every function with `wrap`. Used to apply the profiling
    /// sync-barrier decorator to an entire generated function sequence.
    pub fn wrap(self, wrap: impl Fn(Box<dyn Function>) -> Box<dyn Function>) -> Self {
        Self { functions: self.functions.into_iter().map(wrap).collect() }
    }
}

/// Wraps an inner function so that, after `run` returns, the backend's config is synced. Ensures
/// measurement boundaries (profiling) line up with kernel completion on asynchronous backends.
pub struct SyncFunction {
    inner: Box<dyn Function>,
    config: Rc<dyn BackendConfig>,
}

impl SyncFunction {
    pub fn new(inner: Box<dyn Function>, config: Rc<dyn BackendConfig>) -> Self {
        Self { inner, config }
    }
}

impl Function for SyncFunction {
    fn prepare(&self) -> Result<()> {
        self.inner.prepare()
    }

    fn run(&self) -> Result<()> {
        self.inner.run()?;
        self.config.sync()
    }
}
