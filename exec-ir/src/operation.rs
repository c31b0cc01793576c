use exec_tensor_abi::ElementType;

use crate::{OperandIndex, SubgraphId};

/// The operation vocabulary this factory is exercised against. The lowering/partitioning pass
/// that produces these is out of scope; this is the minimum real vocabulary the end-to-end
/// scenarios need (elementwise compute on a single backend, branching across subgraphs).
#[derive(Clone, Debug, PartialEq)]
pub enum OpCode {
    Add,
    Sub,
    Mul,
    Relu,
    Cast(ElementType),
    If { cond: OperandIndex, then_subgraph: SubgraphId, else_subgraph: SubgraphId },
}

/// A single operation. `inputs` uses `Option` to model an undefined input slot (a kernel
/// argument the frontend left unbound); the default tensor registration path filters these out.
#[derive(Clone, Debug)]
pub struct Operation {
    pub op_code: OpCode,
    pub inputs: Vec<Option<OperandIndex>>,
    pub outputs: Vec<OperandIndex>,
}

impl Operation {
    pub fn new(op_code: OpCode, inputs: Vec<Option<OperandIndex>>, outputs: Vec<OperandIndex>) -> Self {
        Self { op_code, inputs, outputs }
    }

    pub fn defined_inputs(&self) -> impl Iterator<Item = OperandIndex> + '_ {
        self.inputs.iter().filter_map(|input| *input)
    }
}

/// A contiguous run of operations assigned to a single backend during lowering.
#[derive(Clone, Debug, Default)]
pub struct OpSequence {
    pub operations: Vec<Operation>,
}

impl OpSequence {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    /// The union of every operation's defined inputs and outputs in this op-sequence, each
    /// operand appearing once.
    pub fn operand_union(&self) -> Vec<OperandIndex> {
        let mut seen = std::collections::HashSet::new();
        let mut union = Vec::new();
        for op in &self.operations {
            for operand in op.defined_inputs().chain(op.outputs.iter().copied()) {
                if seen.insert(operand) {
                    union.push(operand);
                }
            }
        }
        union
    }
}
