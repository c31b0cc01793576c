use std::collections::HashMap;
use std::rc::Rc;

use exec_backend::{BackendContext, ExecutorMap, Function, FunctionSequence, SyncFunction, TensorBuilder};
use exec_ir::{BackendId, LoweredGraph, OpSequenceIndex};

use crate::{Error, Result};

/// Generates the function sequence for a single op-sequence, injecting the tensor-builder
/// registry and the executor map into the control-flow kernel generator first (spec §4.6 steps
/// 1-2), and wrapping every generated function in a profiling sync-barrier when requested (step
/// 4).
pub fn generate_kernels(
    graph: &LoweredGraph,
    op_seq: OpSequenceIndex,
    backend_contexts: &HashMap<BackendId, BackendContext>,
    executor_map: &ExecutorMap,
    he_profiling_mode: bool,
) -> Result<FunctionSequence> {
    let lower_info = graph.lower_info_op_seq(op_seq)?;
    let context = backend_contexts
        .get(&lower_info.backend)
        .ok_or(Error::MissingBackendContext(lower_info.backend))?;

    if let Some(control_flow) = context.kernel_generator.as_control_flow() {
        let builders: Vec<Rc<dyn TensorBuilder>> = backend_contexts.values().map(|ctx| ctx.tensor_builder.clone()).collect();
        control_flow.set_tensor_builders(builders);
        control_flow.set_executor_map(executor_map.clone());
    }

    let sequence = context.kernel_generator.generate(graph, op_seq)?;

    if he_profiling_mode {
        let config = context.config.clone();
        return Ok(sequence.wrap(move |f: Box<dyn Function>| Box::new(SyncFunction::new(f, config.clone())) as Box<dyn Function>));
    }
    Ok(sequence)
}
