use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use exec_backend::{BackendContext, Executor, ExecutorMap, FunctionSequence, MemoryPolicy, Observer};
use exec_backend_controlflow::ControlFlowTensorBuilder;
use exec_ir::{BackendId, LoweredGraph, OpSequenceIndex};

use crate::{config::CompilerOptions, executors::run_construction_pipeline, observers::TracingObserver, Result};

/// Walks the linearized op-sequence order on the calling thread — one `FunctionSequence` runs to
/// completion before the next starts. The simplest of the three strategies and the only one that
/// uses `MemoryPolicy::UseDefLifetime`, since a fixed linear order gives exact use/def lifetimes.
pub struct LinearExecutor {
    graph: LoweredGraph,
    order: Vec<OpSequenceIndex>,
    functions: HashMap<OpSequenceIndex, FunctionSequence>,
    observers: RefCell<Vec<Box<dyn Observer>>>,
    _backend_contexts: HashMap<BackendId, BackendContext>,
}

impl Executor for LinearExecutor {
    fn add_observer(&self, observer: Box<dyn Observer>) {
        self.observers.borrow_mut().push(observer);
    }

    fn graph(&self) -> &LoweredGraph {
        &self.graph
    }

    fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    fn execute(&self) -> exec_backend::Result<()> {
        for (step, &op_seq) in self.order.iter().enumerate() {
            let Some(sequence) = self.functions.get(&op_seq) else { continue };
            sequence.run_all()?;
            for observer in self.observers.borrow().iter() {
                observer.on_op_sequence_complete(step);
            }
        }
        Ok(())
    }
}

pub async fn create_linear_executor(
    graph: LoweredGraph,
    backend_contexts: HashMap<BackendId, BackendContext>,
    controlflow_builder: Rc<ControlFlowTensorBuilder>,
    options: &CompilerOptions,
    executor_map: &ExecutorMap,
) -> Result<Rc<LinearExecutor>> {
    tracing::debug!(executor = "Linear", "constructing executor");
    let built = run_construction_pipeline(graph, backend_contexts, &controlflow_builder, options, executor_map, MemoryPolicy::UseDefLifetime).await?;

    let executor = Rc::new(LinearExecutor {
        graph: built.graph,
        order: built.linearized,
        functions: built.functions,
        observers: RefCell::new(Vec::new()),
        _backend_contexts: built.backend_contexts,
    });

    if let Some(path) = &options.trace_filepath {
        executor.add_observer(Box::new(TracingObserver::new(path.clone())));
    }

    Ok(executor)
}
