use std::collections::HashMap;

use exec_backend::{BackendContext, Tensor};
use exec_ir::{BackendId, LoweredGraph, OpSequenceIndex};

use crate::{Error, Result};

/// For each operand an op-sequence touches that its own backend has no tensor for, searches every
/// backend's tensor builder for one and, if it is portable, installs it as a migrant tensor. A
/// non-portable match is left alone: the consuming backend's kernel generator must materialize its
/// own copy, which is outside this spec.
pub fn wire_external_tensors(
    graph: &LoweredGraph,
    op_seq: OpSequenceIndex,
    backend_contexts: &HashMap<BackendId, BackendContext>,
) -> Result<()> {
    let lower_info = graph.lower_info_op_seq(op_seq)?;
    let context = backend_contexts
        .get(&lower_info.backend)
        .ok_or(Error::MissingBackendContext(lower_info.backend))?;

    for operand in graph.op_sequence(op_seq).operand_union() {
        if context.tensor_builder.tensor_at(operand).is_some() {
            continue;
        }
        let found = backend_contexts.values().find_map(|ctx| ctx.tensor_builder.tensor_at(operand));
        let Some(tensor) = found else {
            return Err(exec_backend::Error::MissingTensor(operand).into());
        };
        if !tensor.is_portable() {
            continue;
        }
        context.tensor_builder.set_migrant_tensor(operand, tensor)?;
    }
    Ok(())
}
