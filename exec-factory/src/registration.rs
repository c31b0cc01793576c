use std::collections::HashMap;

use exec_backend::{BackendContext, OperandInfo};
use exec_ir::{permute_shape, BackendId, LoweredGraph, LowerInfoOpSeq, OpSequenceIndex};

use crate::{Error, Result};

/// Registers every operand an op-sequence touches with its owning backend's tensor builder,
/// delegating to a custom `TensorRegister` when the backend supplies one.
pub fn register_tensors(
    graph: &LoweredGraph,
    op_seq: OpSequenceIndex,
    backend_contexts: &HashMap<BackendId, BackendContext>,
) -> Result<()> {
    let lower_info = graph.lower_info_op_seq(op_seq)?;
    let context = backend_contexts
        .get(&lower_info.backend)
        .ok_or(Error::MissingBackendContext(lower_info.backend))?;

    if let Some(register) = &context.tensor_register {
        return register.register_tensors(graph, op_seq).map_err(Into::into);
    }
    default_register(graph, op_seq, lower_info, context)
}

/// The default policy (spec §4.4): iterate the op-sequence's operand union, skip already
/// registered operands, skip operands whose def-factor belongs to a foreign backend (they arrive
/// later as migrant tensors), and register the rest under this backend's layout.
fn default_register(
    graph: &LoweredGraph,
    op_seq: OpSequenceIndex,
    lower_info: &LowerInfoOpSeq,
    context: &BackendContext,
) -> Result<()> {
    for operand in graph.op_sequence(op_seq).operand_union() {
        if context.tensor_builder.is_registered(operand) {
            continue;
        }
        let def_factor = *graph.lower_info_operand(operand)?.only_def_factor(operand)?;
        if def_factor.backend != lower_info.backend {
            continue;
        }
        let data = graph.operand(operand);
        let shape = permute_shape(&data.shape, lower_info.layout, def_factor.layout);
        let info = OperandInfo { shape, element_type: data.element_type, is_constant: data.is_constant, layout: def_factor.layout };
        context.tensor_builder.register_tensor_info(operand, info)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use exec_ir::{DefFactor, Layout, MemAllocClass, OpCode, OpSequence, Operand, OperandIndex, Operation};

    fn single_add_graph() -> LoweredGraph {
        let operands = vec![
            Operand::new(vec![4], exec_tensor_abi::ElementType::F32, MemAllocClass::Static),
            Operand::new(vec![4], exec_tensor_abi::ElementType::F32, MemAllocClass::Static),
            Operand::new(vec![4], exec_tensor_abi::ElementType::F32, MemAllocClass::Static),
        ];
        let op_sequences =
            vec![OpSequence::new(vec![Operation::new(OpCode::Add, vec![Some(OperandIndex(0)), Some(OperandIndex(1))], vec![OperandIndex(2)])])];
        let mut operand_lower_info = HashMap::new();
        for i in 0..3 {
            operand_lower_info.insert(
                OperandIndex(i),
                exec_ir::LowerInfoOperand::new(vec![DefFactor { backend: BackendId("cpu"), layout: Layout::Nhwc }]),
            );
        }
        let mut op_seq_lower_info = HashMap::new();
        op_seq_lower_info.insert(OpSequenceIndex(0), LowerInfoOpSeq { backend: BackendId("cpu"), layout: Layout::Nhwc });
        LoweredGraph::new(operands, op_sequences, operand_lower_info, op_seq_lower_info, vec![OperandIndex(0), OperandIndex(1)], vec![OperandIndex(2)])
    }

    #[test]
    fn default_registration_covers_the_operand_union() {
        let graph = single_add_graph();
        let mut contexts = HashMap::new();
        contexts.insert(BackendId("cpu"), exec_backend_cpu::context().unwrap());
        register_tensors(&graph, OpSequenceIndex(0), &contexts).unwrap();
        assert!(contexts[&BackendId("cpu")].tensor_builder.is_registered(OperandIndex(0)));
        assert!(contexts[&BackendId("cpu")].tensor_builder.is_registered(OperandIndex(1)));
        assert!(contexts[&BackendId("cpu")].tensor_builder.is_registered(OperandIndex(2)));
    }
}
