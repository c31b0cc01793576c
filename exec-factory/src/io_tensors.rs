use std::rc::Rc;

use exec_backend_controlflow::ControlFlowTensorBuilder;
use exec_ir::{permute_shape, Layout, LoweredGraph};

use crate::Result;

/// Allocates externally-visible model input/output tensors in the control-flow backend, primary
/// subgraph only (spec §4.1 `is_primary_subgraph`; nested subgraphs inherit their IO from the
/// enclosing `If`'s condition/branch wiring instead).
pub fn initialize_model_io_tensors(
    graph: &LoweredGraph,
    is_primary_subgraph: bool,
    user_tensor_layout: Layout,
    controlflow_builder: &Rc<ControlFlowTensorBuilder>,
) -> Result<()> {
    if !is_primary_subgraph {
        return Ok(());
    }

    for &operand in graph.model_inputs.iter().chain(graph.model_outputs.iter()) {
        let data = graph.operand(operand);
        let def_factor = graph.lower_info_operand(operand)?.only_def_factor(operand)?;
        let shape = permute_shape(&data.shape, def_factor.layout, user_tensor_layout);
        controlflow_builder.register_user_tensor(operand, shape, data.element_type, user_tensor_layout);
    }
    for &operand in &graph.model_inputs {
        controlflow_builder.record_input(operand);
    }
    for &operand in &graph.model_outputs {
        controlflow_builder.record_output(operand);
    }
    Ok(())
}
