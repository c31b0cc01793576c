use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;
use exec_backend::{ControlFlowKernelGenerator, Error, Executor, ExecutorMap, Function, FunctionSequence, KernelGenerator, Result, Tensor, TensorBuilder};
use exec_ir::{LoweredGraph, OpCode, OpSequenceIndex, SubgraphId};

use crate::builder::ControlFlowTensorBuilder;

/// Reads an `If`'s condition tensor and dispatches to whichever of the two subgraph executors it
/// selects. The condition tensor may live on any backend — that is the reason `Tensor::read_bytes`
/// exists — so the lookup searches every tensor builder registered with this generator rather than
/// assuming the condition always lands on the control-flow backend itself.
struct CallSubgraphFunction {
    cond: exec_ir::OperandIndex,
    then_subgraph: SubgraphId,
    else_subgraph: SubgraphId,
    tensor_builders: Rc<RefCell<Vec<Rc<dyn TensorBuilder>>>>,
    executor_map: ExecutorMap,
}

impl CallSubgraphFunction {
    fn condition_tensor(&self) -> Result<Rc<dyn Tensor>> {
        self.tensor_builders
            .borrow()
            .iter()
            .find_map(|builder| builder.tensor_at(self.cond))
            .ok_or(Error::MissingTensor(self.cond))
    }

    fn executor_for(&self, subgraph: SubgraphId) -> Result<Rc<dyn Executor>> {
        self.executor_map
            .borrow()
            .get(&subgraph)
            .cloned()
            .ok_or_else(|| anyhow!("no executor registered for subgraph {subgraph:?}").into())
    }
}

impl Function for CallSubgraphFunction {
    fn prepare(&self) -> Result<()> {
        Ok(())
    }

    fn run(&self) -> Result<()> {
        let bytes = self.condition_tensor()?.read_bytes();
        let taken = bytes.first().copied().unwrap_or(0) != 0;
        let subgraph = if taken { self.then_subgraph } else { self.else_subgraph };
        self.executor_for(subgraph)?.execute()
    }
}

/// The control-flow backend's kernel generator. It is the only `KernelGenerator` that answers
/// `as_control_flow` with `Some`, since it is the only one that ever needs to call into a sibling
/// subgraph's executor.
pub struct ControlFlowKernelGeneratorImpl {
    builder: Rc<ControlFlowTensorBuilder>,
    tensor_builders: Rc<RefCell<Vec<Rc<dyn TensorBuilder>>>>,
    executor_map: RefCell<Option<ExecutorMap>>,
}

impl ControlFlowKernelGeneratorImpl {
    pub fn new(builder: Rc<ControlFlowTensorBuilder>) -> Self {
        let self_as_builder: Rc<dyn TensorBuilder> = builder.clone();
        Self { builder, tensor_builders: Rc::new(RefCell::new(vec![self_as_builder])), executor_map: RefCell::new(None) }
    }
}

impl KernelGenerator for ControlFlowKernelGeneratorImpl {
    fn generate(&self, graph: &LoweredGraph, op_seq: OpSequenceIndex) -> Result<FunctionSequence> {
        let executor_map = self.executor_map.borrow().clone().ok_or_else(|| {
            Error::Configuration("control-flow kernel generator used before set_executor_map".into())
        })?;
        let mut sequence = FunctionSequence::default();
        for op in &graph.op_sequence(op_seq).operations {
            let function: Box<dyn Function> = match &op.op_code {
                OpCode::If { cond, then_subgraph, else_subgraph } => Box::new(CallSubgraphFunction {
                    cond: *cond,
                    then_subgraph: *then_subgraph,
                    else_subgraph: *else_subgraph,
                    tensor_builders: self.tensor_builders.clone(),
                    executor_map: executor_map.clone(),
                }),
                other => return Err(anyhow!("control-flow backend cannot generate a kernel for {other:?}").into()),
            };
            sequence.push(function);
        }
        Ok(sequence)
    }

    fn as_control_flow(&self) -> Option<&dyn ControlFlowKernelGenerator> {
        Some(self)
    }
}

impl ControlFlowKernelGenerator for ControlFlowKernelGeneratorImpl {
    fn set_tensor_builders(&self, builders: Vec<Rc<dyn TensorBuilder>>) {
        let mut own = vec![self.builder.clone() as Rc<dyn TensorBuilder>];
        own.extend(builders);
        *self.tensor_builders.borrow_mut() = own;
    }

    fn set_executor_map(&self, executor_map: ExecutorMap) {
        *self.executor_map.borrow_mut() = Some(executor_map);
    }
}
