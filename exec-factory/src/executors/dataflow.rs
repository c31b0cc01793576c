use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use exec_backend::{BackendContext, Executor, ExecutorMap, FunctionSequence, MemoryPolicy, Observer};
use exec_backend_controlflow::ControlFlowTensorBuilder;
use exec_ir::{BackendId, LoweredGraph, OpSequenceIndex};

use crate::{
    config::CompilerOptions,
    executors::run_construction_pipeline,
    observers::{ProfileObserver, TracingObserver},
    Result,
};

/// Dispatches op-sequences in readiness order rather than a single fixed linear order: a
/// per-op-sequence remaining-dependency counter (from `LoweredGraph::dependency_graph`, the same
/// bookkeeping `linearize` uses) drives a ready queue instead of walking one static `Vec` order.
/// Still runs on the calling thread — see `ParallelExecutor` for the distinction.
pub struct DataflowExecutor {
    graph: LoweredGraph,
    adjacency: Vec<Vec<OpSequenceIndex>>,
    initial_in_degree: Vec<usize>,
    functions: HashMap<OpSequenceIndex, FunctionSequence>,
    observers: RefCell<Vec<Box<dyn Observer>>>,
    _backend_contexts: HashMap<BackendId, BackendContext>,
}

impl Executor for DataflowExecutor {
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
        let (sender, receiver) = flume::unbounded();
        let mut in_degree = self.initial_in_degree.clone();

        for (index, &count) in in_degree.iter().enumerate() {
            if count == 0 {
                sender.send(OpSequenceIndex(index)).expect("receiver held by this call");
            }
        }

        let mut completed = 0;
        let mut step = 0;
        while completed < in_degree.len() {
            let Ok(op_seq) = receiver.try_recv() else { break };
            if let Some(sequence) = self.functions.get(&op_seq) {
                sequence.run_all()?;
                for observer in self.observers.borrow().iter() {
                    observer.on_op_sequence_complete(step);
                }
                step += 1;
            }
            completed += 1;

            for &next in &self.adjacency[op_seq.0] {
                in_degree[next.0] -= 1;
                if in_degree[next.0] == 0 {
                    sender.send(next).expect("receiver held by this call");
                }
            }
        }

        Ok(())
    }
}

pub async fn create_dataflow_executor(
    graph: LoweredGraph,
    backend_contexts: HashMap<BackendId, BackendContext>,
    controlflow_builder: Rc<ControlFlowTensorBuilder>,
    options: &CompilerOptions,
    executor_map: &ExecutorMap,
) -> Result<Rc<DataflowExecutor>> {
    tracing::debug!(executor = "Dataflow", "constructing executor");
    let (adjacency, initial_in_degree) = graph.dependency_graph();
    let built = run_construction_pipeline(graph, backend_contexts, &controlflow_builder, options, executor_map, MemoryPolicy::FullLifetime).await?;

    let executor = Rc::new(DataflowExecutor {
        graph: built.graph,
        adjacency,
        initial_in_degree,
        functions: built.functions,
        observers: RefCell::new(Vec::new()),
        _backend_contexts: built.backend_contexts,
    });

    if let Some(path) = &options.trace_filepath {
        executor.add_observer(Box::new(TracingObserver::new(path.clone())));
    }
    if options.he_profiling_mode {
        let backends = executor._backend_contexts.keys().copied().collect();
        executor.add_observer(Box::new(ProfileObserver::new(backends)));
    }

    Ok(executor)
}
