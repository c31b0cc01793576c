use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use exec_backend::{BackendContext, Executor, ExecutorMap, FunctionSequence, MemoryPolicy, Observer};
use exec_backend_controlflow::ControlFlowTensorBuilder;
use exec_ir::{BackendId, LoweredGraph, OpSequenceIndex};

use crate::{config::CompilerOptions, executors::run_construction_pipeline, observers::TracingObserver, Error, Result};

/// Models "a fixed pool — implementation choice" (spec §5) as readiness-driven dispatch on the
/// calling thread: every op-sequence whose dependencies are satisfied is run in the wave it
/// becomes ready, simulating the interleaving a real thread pool would produce without requiring
/// tensors and functions to be `Send`. Relies on `MemoryPolicy::FullLifetime` for the same reason
/// real concurrent execution would: no tensor may be freed mid-run.
pub struct ParallelExecutor {
    graph: LoweredGraph,
    adjacency: Vec<Vec<OpSequenceIndex>>,
    initial_in_degree: Vec<usize>,
    functions: HashMap<OpSequenceIndex, FunctionSequence>,
    observers: RefCell<Vec<Box<dyn Observer>>>,
    _backend_contexts: HashMap<BackendId, BackendContext>,
}

impl Executor for ParallelExecutor {
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
        let mut in_degree = self.initial_in_degree.clone();
        let mut wave: Vec<OpSequenceIndex> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count == 0)
            .map(|(index, _)| OpSequenceIndex(index))
            .collect();
        let mut step = 0;

        while !wave.is_empty() {
            let mut next_wave = Vec::new();
            for op_seq in wave {
                if let Some(sequence) = self.functions.get(&op_seq) {
                    sequence.run_all()?;
                    for observer in self.observers.borrow().iter() {
                        observer.on_op_sequence_complete(step);
                    }
                    step += 1;
                }
                for &next in &self.adjacency[op_seq.0] {
                    in_degree[next.0] -= 1;
                    if in_degree[next.0] == 0 {
                        next_wave.push(next);
                    }
                }
            }
            wave = next_wave;
        }

        Ok(())
    }
}

pub async fn create_parallel_executor(
    graph: LoweredGraph,
    backend_contexts: HashMap<BackendId, BackendContext>,
    controlflow_builder: Rc<ControlFlowTensorBuilder>,
    options: &CompilerOptions,
    executor_map: &ExecutorMap,
) -> Result<Rc<ParallelExecutor>> {
    if options.he_profiling_mode {
        return Err(Error::Configuration("profiling is not supported on the Parallel executor".into()));
    }

    tracing::debug!(executor = "Parallel", "constructing executor");
    let (adjacency, initial_in_degree) = graph.dependency_graph();
    let built = run_construction_pipeline(graph, backend_contexts, &controlflow_builder, options, executor_map, MemoryPolicy::FullLifetime).await?;

    let executor = Rc::new(ParallelExecutor {
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

    Ok(executor)
}
