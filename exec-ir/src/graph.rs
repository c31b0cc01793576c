use std::collections::{HashMap, VecDeque};

use crate::{
    BackendId, Error, LowerInfoOpSeq, LowerInfoOperand, Operand, OpSequence, OpSequenceIndex,
    OperandIndex, OperationIndex,
};

/// The input to a factory call: the operand table, the op-sequence table, and the lowering
/// metadata that assigns each piece of the graph to a backend and a layout.
pub struct LoweredGraph {
    pub operands: Vec<Operand>,
    pub op_sequences: Vec<OpSequence>,
    pub operand_lower_info: HashMap<OperandIndex, LowerInfoOperand>,
    pub op_seq_lower_info: HashMap<OpSequenceIndex, LowerInfoOpSeq>,
    pub model_inputs: Vec<OperandIndex>,
    pub model_outputs: Vec<OperandIndex>,
}

impl LoweredGraph {
    pub fn new(
        operands: Vec<Operand>,
        op_sequences: Vec<OpSequence>,
        operand_lower_info: HashMap<OperandIndex, LowerInfoOperand>,
        op_seq_lower_info: HashMap<OpSequenceIndex, LowerInfoOpSeq>,
        model_inputs: Vec<OperandIndex>,
        model_outputs: Vec<OperandIndex>,
    ) -> Self {
        Self { operands, op_sequences, operand_lower_info, op_seq_lower_info, model_inputs, model_outputs }
    }

    pub fn operand(&self, index: OperandIndex) -> &Operand {
        &self.operands[index.0]
    }

    pub fn op_sequence(&self, index: OpSequenceIndex) -> &OpSequence {
        &self.op_sequences[index.0]
    }

    pub fn lower_info_operand(&self, index: OperandIndex) -> Result<&LowerInfoOperand, Error> {
        self.operand_lower_info.get(&index).ok_or(Error::MissingDefFactor(index))
    }

    pub fn lower_info_op_seq(&self, index: OpSequenceIndex) -> Result<&LowerInfoOpSeq, Error> {
        self.op_seq_lower_info.get(&index).ok_or(Error::MissingOpSeqLowerInfo(index))
    }

    /// For each backend present in the graph, the operation indices it owns and the operand
    /// indices it defines. An operand appears once per backend that has a def-factor for it.
    pub fn initialize_backend_contexts(&self) -> Result<HashMap<BackendId, (Vec<OperationIndex>, Vec<OperandIndex>)>, Error> {
        let mut per_backend: HashMap<BackendId, (Vec<OperationIndex>, Vec<OperandIndex>)> = HashMap::new();

        for (seq_idx, op_seq) in self.op_sequences.iter().enumerate() {
            let seq_idx = OpSequenceIndex(seq_idx);
            let backend = self.lower_info_op_seq(seq_idx)?.backend;
            let entry = per_backend.entry(backend).or_default();
            for op_idx in 0..op_seq.operations.len() {
                entry.0.push(OperationIndex(op_idx));
            }
        }

        for (&operand_idx, info) in &self.operand_lower_info {
            for factor in &info.def_factors {
                per_backend.entry(factor.backend).or_default().1.push(operand_idx);
            }
        }

        Ok(per_backend)
    }

    /// Builds the op-sequence dependency graph: for each op-sequence, the op-sequences that
    /// become eligible once it completes (`adjacency`), and each op-sequence's initial count of
    /// unmet producer dependencies (`in_degree`). Shared by `linearize` and by the dataflow and
    /// parallel executors' readiness-driven dispatch, which need the same bookkeeping at runtime
    /// rather than only a single static order.
    pub fn dependency_graph(&self) -> (Vec<Vec<OpSequenceIndex>>, Vec<usize>) {
        let producer = self.operand_producers();

        let count = self.op_sequences.len();
        let mut adjacency: Vec<Vec<OpSequenceIndex>> = vec![Vec::new(); count];
        let mut in_degree: Vec<usize> = vec![0; count];

        for (seq_idx, op_seq) in self.op_sequences.iter().enumerate() {
            let mut producers_seen = std::collections::HashSet::new();
            for op in &op_seq.operations {
                for input in op.defined_inputs() {
                    if let Some(&producer_idx) = producer.get(&input) {
                        if producer_idx.0 != seq_idx && producers_seen.insert(producer_idx) {
                            adjacency[producer_idx.0].push(OpSequenceIndex(seq_idx));
                            in_degree[seq_idx] += 1;
                        }
                    }
                }
            }
        }

        (adjacency, in_degree)
    }

    /// Returns `op_sequences` in a topological order consistent with data dependencies: an
    /// op-sequence that consumes an operand produced by another op-sequence is ordered after it.
    pub fn linearize(&self) -> Result<Vec<OpSequenceIndex>, Error> {
        let (adjacency, mut in_degree) = self.dependency_graph();
        let count = self.op_sequences.len();

        let mut queue: VecDeque<OpSequenceIndex> = (0..count).filter(|&i| in_degree[i] == 0).map(OpSequenceIndex).collect();
        let mut order = Vec::with_capacity(count);

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &next in &adjacency[node.0] {
                in_degree[next.0] -= 1;
                if in_degree[next.0] == 0 {
                    queue.push_back(next);
                }
            }
        }

        if order.len() != count {
            return Err(Error::CyclicGraph(order.len(), count));
        }

        Ok(order)
    }

    /// Maps every operand produced as an output within some op-sequence to the op-sequence that
    /// produces it. An operand with no entry here is a model input or a constant.
    fn operand_producers(&self) -> HashMap<OperandIndex, OpSequenceIndex> {
        let mut producer = HashMap::new();
        for (seq_idx, op_seq) in self.op_sequences.iter().enumerate() {
            for op in &op_seq.operations {
                for &output in &op.outputs {
                    producer.insert(output, OpSequenceIndex(seq_idx));
                }
            }
        }
        producer
    }
}
