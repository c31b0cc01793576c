mod dataflow;
mod linear;
mod parallel;

pub use dataflow::{create_dataflow_executor, DataflowExecutor};
pub use linear::{create_linear_executor, LinearExecutor};
pub use parallel::{create_parallel_executor, ParallelExecutor};

use std::collections::HashMap;
use std::rc::Rc;

use exec_backend::{BackendContext, ExecutorMap, FunctionSequence, MemoryPolicy};
use exec_backend_controlflow::ControlFlowTensorBuilder;
use exec_ir::{BackendId, LoweredGraph, OpSequenceIndex};

use crate::{config::CompilerOptions, io_tensors, kernelgen, registration, wiring, Result};

/// Everything a concrete executor needs after the shared construction pipeline (spec §4.2 steps
/// 1-14) has run: the lowered graph, its linearized order, one function sequence per op-sequence,
/// and the backend contexts (kept alive for the executor's lifetime since tensor builders own the
/// tensor memory).
pub(crate) struct Built {
    pub graph: LoweredGraph,
    pub linearized: Vec<OpSequenceIndex>,
    pub functions: HashMap<OpSequenceIndex, FunctionSequence>,
    #[allow(dead_code)]
    pub backend_contexts: HashMap<BackendId, BackendContext>,
}

/// Runs spec §4.2 steps 1 through 14, parameterized by the memory policy that steps 7-8 apply.
/// The three executor builders differ only in this policy and in what they construct from the
/// result (§4.2 step 15 onward).
pub(crate) async fn run_construction_pipeline(
    mut graph: LoweredGraph,
    mut backend_contexts: HashMap<BackendId, BackendContext>,
    controlflow_builder: &Rc<ControlFlowTensorBuilder>,
    options: &CompilerOptions,
    executor_map: &ExecutorMap,
    memory_policy: MemoryPolicy,
) -> Result<Built> {
    // 1. initialize backend contexts
    let per_backend = graph.initialize_backend_contexts()?;
    for (backend, (ops, operands)) in per_backend {
        if let Some(context) = backend_contexts.get_mut(&backend) {
            context.initialize(ops, operands);
        }
    }

    // 2. per-backend optimization
    for context in backend_contexts.values() {
        if let Some(optimizer) = &context.optimizer {
            optimizer.optimize()?;
        }
    }

    // 3. linearize
    let linearized = graph.linearize()?;

    // 4. tensor registration, in linearized order
    for &op_seq in &linearized {
        registration::register_tensors(&graph, op_seq, &backend_contexts)?;
    }

    // 5. IO tensor initialization (primary subgraph only)
    io_tensors::initialize_model_io_tensors(&graph, options.is_primary_subgraph, options.user_tensor_layout, controlflow_builder)?;

    // 6. dump the linearized plan (debug side effect only)
    tracing::debug!(order = ?linearized, "linearized execution plan");

    // 7. plan tensors: FullLifetime widens every registered operand's lifetime to the whole run by
    // notifying first-use ahead of `prepare`; UseDefLifetime relies on each backend's own
    // use/def-aware planning inside `prepare` (the backends in this workspace retain every tensor
    // unconditionally, so there is nothing further to do here for that policy).
    if memory_policy == MemoryPolicy::FullLifetime {
        for index in 0..graph.operands.len() {
            let operand = exec_ir::OperandIndex(index);
            for context in backend_contexts.values() {
                if context.tensor_builder.is_registered(operand) {
                    context.tensor_builder.notify_first_use(operand);
                }
            }
        }
    }

    // 8. prepare every tensor builder
    for context in backend_contexts.values() {
        context.tensor_builder.prepare(memory_policy)?;
    }

    // 9. external tensor wiring
    for &op_seq in &linearized {
        wiring::wire_external_tensors(&graph, op_seq, &backend_contexts)?;
    }

    // 10. kernel generation, in topological order
    let mut functions = HashMap::new();
    for &op_seq in &linearized {
        let sequence = kernelgen::generate_kernels(&graph, op_seq, &backend_contexts, executor_map, options.he_profiling_mode)?;
        functions.insert(op_seq, sequence);
    }

    // 11. allocate backend memory
    for context in backend_contexts.values() {
        context.tensor_builder.allocate()?;
    }

    // 12. initialize constants
    for context in backend_contexts.values() {
        context.constant_initializer.init_consts(&graph, context.owned_operands()).await?;
    }

    // 13. release source data: no kernel may run before this point
    for operand in &graph.operands {
        operand.release_data();
    }

    // 14. prepare functions, then let each backend's builder know preparation is done
    for sequence in functions.values() {
        sequence.prepare_all()?;
    }
    for context in backend_contexts.values() {
        context.tensor_builder.post_function_prepare()?;
    }

    Ok(Built { graph, linearized, functions, backend_contexts })
}
