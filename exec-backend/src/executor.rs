use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use exec_ir::{LoweredGraph, SubgraphId};

use crate::Result;

/// A tracing or profiling sink attached to a constructed executor. What an observer does with an
/// event (file format, aggregation) is outside this crate's scope; only attachment is specified.
pub trait Observer {
    fn name(&self) -> &str;
    fn on_op_sequence_complete(&self, op_seq: usize);
}

/// The object every executor strategy returns. Runtime execution itself is specified only at
/// this interface boundary (see the crate's module docs); `execute` is a minimal synchronous
/// entry point sufficient to prove a constructed executor actually runs its functions.
pub trait Executor {
    fn add_observer(&self, observer: Box<dyn Observer>);
    fn graph(&self) -> &LoweredGraph;
    fn execute(&self) -> Result<()>;
    fn observer_count(&self) -> usize;
}

/// Shared mapping from subgraph identifier to constructed executor. Populated bottom-up by the
/// caller across nested subgraphs; the control-flow kernel generator reads it to emit
/// call-into-subgraph kernels.
///
/// Reference-counted (`Rc`, not `Arc`) because every other construction-time structure in this
/// workspace (tensor builders, backend contexts) is `Rc`-shared and single-threaded, following
/// the teacher's ownership idiom; the `ParallelExecutor`'s concurrency is therefore modeled as
/// readiness-driven dispatch on a single thread rather than real OS-thread fan-out (see
/// `exec-factory`'s parallel executor module for the resulting dispatch-order guarantee).
pub type ExecutorMap = Rc<RefCell<HashMap<SubgraphId, Rc<dyn Executor>>>>;
