//! End-to-end scenarios driving each executor strategy through its full construction pipeline,
//! not just the per-stage unit tests the individual modules carry. Mirrors the six scenarios the
//! factory is expected to satisfy: single-backend linear compute, a cross-backend migrant tensor,
//! nested control flow, the dataflow memory policy's full-lifetime planning, profiling
//! attachment, and primary-vs-nested IO tensor initialization.

use std::collections::HashMap;
use std::rc::Rc;

use exec_backend::{Executor, ExecutorMap, Observer, TensorBuilder};
use exec_backend_controlflow::ControlFlowTensorBuilder;
use exec_backend_cpu::CpuTensorBuilder;
use exec_factory::{create_dataflow_executor, create_linear_executor, create_parallel_executor, CompilerOptions};
use exec_ir::{
    BackendId, DefFactor, Layout, LowerInfoOpSeq, LowerInfoOperand, LoweredGraph, MemAllocClass, OpCode, OpSequence, OpSequenceIndex, Operand,
    OperandIndex, Operation, SubgraphId,
};
use exec_tensor_abi::ElementType;

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}

fn read_f32(bytes: &[u8]) -> Vec<f32> {
    bytes.chunks_exact(4).map(|b| f32::from_ne_bytes(b.try_into().unwrap())).collect()
}

fn def(backend: &'static str) -> DefFactor {
    DefFactor { backend: BackendId(backend), layout: Layout::Nhwc }
}

/// Sends an operand's current bytes down a probe channel on every op-sequence completion —
/// the shape a host would actually attach `exec-probe` to an executor's observer hook with.
struct ProbeObserver {
    operand: OperandIndex,
    builder: Rc<dyn TensorBuilder>,
    channel: exec_probe::Channel,
}

impl Observer for ProbeObserver {
    fn name(&self) -> &str {
        "probe"
    }

    fn on_op_sequence_complete(&self, _op_seq: usize) {
        if let Some(tensor) = self.builder.tensor_at(self.operand) {
            self.channel.send_sync(tensor.read_bytes()).ok();
        }
    }
}

fn lower_info(pairs: impl IntoIterator<Item = (OpSequenceIndex, &'static str)>) -> HashMap<OpSequenceIndex, LowerInfoOpSeq> {
    pairs.into_iter().map(|(idx, backend)| (idx, LowerInfoOpSeq { backend: BackendId(backend), layout: Layout::Nhwc })).collect()
}

// Scenario 1: a single cpu op-sequence computing `a + b`, run through the Linear executor.
#[tokio::test]
async fn single_backend_linear_executor_computes_the_result() {
    let operands = vec![
        Operand::constant(vec![4], ElementType::F32, f32_bytes(&[1.0, 2.0, 3.0, 4.0])),
        Operand::constant(vec![4], ElementType::F32, f32_bytes(&[5.0, 6.0, 7.0, 8.0])),
        Operand::new(vec![4], ElementType::F32, MemAllocClass::Static),
    ];
    let op_sequences =
        vec![OpSequence::new(vec![Operation::new(OpCode::Add, vec![Some(OperandIndex(0)), Some(OperandIndex(1))], vec![OperandIndex(2)])])];
    let operand_lower_info: HashMap<_, _> = (0..3).map(|i| (OperandIndex(i), LowerInfoOperand::new(vec![def("cpu")]))).collect();
    let op_seq_lower_info = lower_info([(OpSequenceIndex(0), "cpu")]);
    let graph = LoweredGraph::new(operands, op_sequences, operand_lower_info, op_seq_lower_info, vec![OperandIndex(0), OperandIndex(1)], vec![
        OperandIndex(2),
    ]);

    let mut contexts = HashMap::new();
    contexts.insert(BackendId("cpu"), exec_backend_cpu::context().unwrap());
    let cpu_builder = contexts[&BackendId("cpu")].tensor_builder.clone();

    let controlflow_builder = Rc::new(ControlFlowTensorBuilder::new());
    let options = CompilerOptions::new("Linear");
    let executor_map: ExecutorMap = Default::default();

    let executor = create_linear_executor(graph, contexts, controlflow_builder, &options, &executor_map).await.unwrap();
    for i in 0..3 {
        assert!(cpu_builder.is_registered(OperandIndex(i)), "operand {i} should be registered before execution");
    }

    let channel = exec_probe::Channel::new();
    let probe = exec_probe::Probe::new(channel.receiver());
    executor.add_observer(Box::new(ProbeObserver { operand: OperandIndex(2), builder: cpu_builder, channel }));

    executor.execute().unwrap();

    let result = probe.retrieve().await.unwrap();
    assert_eq!(read_f32(&result), vec![6.0, 8.0, 10.0, 12.0]);
}

// Scenario 2: cpu produces a portable tensor that accel consumes without its own def-factor,
// proving the migrant-tensor wiring runs end to end through the full pipeline (not just the
// `wiring` module's own unit test, which calls `wire_external_tensors` directly).
#[tokio::test]
async fn cross_backend_migrant_tensor_is_installed_and_consumed() {
    let operands = vec![
        Operand::constant(vec![4], ElementType::F32, f32_bytes(&[1.0, 2.0, 3.0, 4.0])),
        Operand::constant(vec![4], ElementType::F32, f32_bytes(&[5.0, 6.0, 7.0, 8.0])),
        Operand::new(vec![4], ElementType::F32, MemAllocClass::Static),
        Operand::new(vec![4], ElementType::F32, MemAllocClass::Static),
    ];
    let op_sequences = vec![
        OpSequence::new(vec![Operation::new(OpCode::Add, vec![Some(OperandIndex(0)), Some(OperandIndex(1))], vec![OperandIndex(2)])]),
        OpSequence::new(vec![Operation::new(OpCode::Relu, vec![Some(OperandIndex(2))], vec![OperandIndex(3)])]),
    ];
    let mut operand_lower_info: HashMap<_, _> = (0..3).map(|i| (OperandIndex(i), LowerInfoOperand::new(vec![def("cpu")]))).collect();
    operand_lower_info.insert(OperandIndex(3), LowerInfoOperand::new(vec![def("accel")]));
    let op_seq_lower_info = lower_info([(OpSequenceIndex(0), "cpu"), (OpSequenceIndex(1), "accel")]);
    let graph = LoweredGraph::new(operands, op_sequences, operand_lower_info, op_seq_lower_info, vec![OperandIndex(0), OperandIndex(1)], vec![
        OperandIndex(3),
    ]);

    let mut contexts = HashMap::new();
    contexts.insert(BackendId("cpu"), exec_backend_cpu::context().unwrap());
    contexts.insert(BackendId("accel"), exec_backend_accel::context().unwrap());
    let cpu_builder = contexts[&BackendId("cpu")].tensor_builder.clone();
    let accel_builder = contexts[&BackendId("accel")].tensor_builder.clone();

    let controlflow_builder = Rc::new(ControlFlowTensorBuilder::new());
    let options = CompilerOptions::new("Linear");
    let executor_map: ExecutorMap = Default::default();
    let executor = create_linear_executor(graph, contexts, controlflow_builder, &options, &executor_map).await.unwrap();

    assert!(accel_builder.tensor_at(OperandIndex(2)).is_some(), "accel should have a migrant tensor for the cpu-owned operand");
    assert!(cpu_builder.tensor_at(OperandIndex(2)).is_some());

    executor.execute().unwrap();

    let output = accel_builder.tensor_at(OperandIndex(3)).unwrap().read_bytes();
    assert_eq!(read_f32(&output), vec![6.0, 8.0, 10.0, 12.0]);
}

// Scenario 3: a top-level graph with an `If` dispatches to whichever nested subgraph's executor
// its condition selects. Each leaf subgraph is built independently first and registered into a
// shared `ExecutorMap`, mirroring "populated bottom-up by the caller across nested subgraphs".
async fn build_leaf(value: f32) -> (Rc<exec_factory::LinearExecutor>, Rc<dyn TensorBuilder>) {
    let operands = vec![
        Operand::constant(vec![1], ElementType::F32, f32_bytes(&[value])),
        Operand::constant(vec![1], ElementType::F32, f32_bytes(&[0.0])),
        Operand::new(vec![1], ElementType::F32, MemAllocClass::Static),
    ];
    let op_sequences =
        vec![OpSequence::new(vec![Operation::new(OpCode::Add, vec![Some(OperandIndex(0)), Some(OperandIndex(1))], vec![OperandIndex(2)])])];
    let operand_lower_info: HashMap<_, _> = (0..3).map(|i| (OperandIndex(i), LowerInfoOperand::new(vec![def("cpu")]))).collect();
    let op_seq_lower_info = lower_info([(OpSequenceIndex(0), "cpu")]);
    let graph = LoweredGraph::new(operands, op_sequences, operand_lower_info, op_seq_lower_info, vec![], vec![OperandIndex(2)]);

    let mut contexts = HashMap::new();
    contexts.insert(BackendId("cpu"), exec_backend_cpu::context().unwrap());
    let builder = contexts[&BackendId("cpu")].tensor_builder.clone();

    let controlflow_builder = Rc::new(ControlFlowTensorBuilder::new());
    let options = CompilerOptions::new("Linear").primary_subgraph(false);
    let executor_map: ExecutorMap = Default::default();
    let executor = create_linear_executor(graph, contexts, controlflow_builder, &options, &executor_map).await.unwrap();
    (executor, builder)
}

async fn build_branch_selector(cond: bool, executor_map: &ExecutorMap) -> Rc<exec_factory::LinearExecutor> {
    let operands = vec![
        Operand::constant(vec![4], ElementType::F32, f32_bytes(&[1.0, 1.0, 1.0, 1.0])),
        Operand::constant(vec![4], ElementType::F32, f32_bytes(&[1.0, 1.0, 1.0, 1.0])),
        Operand::new(vec![4], ElementType::F32, MemAllocClass::Static),
        Operand::constant(vec![1], ElementType::Bool, vec![cond as u8]),
    ];
    let op_sequences = vec![
        OpSequence::new(vec![Operation::new(
            OpCode::Add,
            vec![Some(OperandIndex(0)), Some(OperandIndex(1))],
            vec![OperandIndex(2), OperandIndex(3)],
        )]),
        OpSequence::new(vec![Operation::new(
            OpCode::If { cond: OperandIndex(3), then_subgraph: SubgraphId(1), else_subgraph: SubgraphId(2) },
            vec![Some(OperandIndex(3))],
            vec![],
        )]),
    ];
    let operand_lower_info: HashMap<_, _> = (0..4).map(|i| (OperandIndex(i), LowerInfoOperand::new(vec![def("cpu")]))).collect();
    let op_seq_lower_info = lower_info([(OpSequenceIndex(0), "cpu"), (OpSequenceIndex(1), "controlflow")]);
    let graph = LoweredGraph::new(operands, op_sequences, operand_lower_info, op_seq_lower_info, vec![], vec![]);

    let controlflow_builder = Rc::new(ControlFlowTensorBuilder::new());
    let mut contexts = HashMap::new();
    contexts.insert(BackendId("cpu"), exec_backend_cpu::context().unwrap());
    contexts.insert(BackendId("controlflow"), exec_backend_controlflow::context(controlflow_builder.clone()).unwrap());

    let options = CompilerOptions::new("Linear");
    create_linear_executor(graph, contexts, controlflow_builder, &options, executor_map).await.unwrap()
}

#[tokio::test]
async fn control_flow_dispatches_to_the_taken_branch_only() {
    let (then_exec, then_builder) = build_leaf(11.0).await;
    let (else_exec, else_builder) = build_leaf(22.0).await;

    let executor_map: ExecutorMap = Default::default();
    executor_map.borrow_mut().insert(SubgraphId(1), then_exec as Rc<dyn Executor>);
    executor_map.borrow_mut().insert(SubgraphId(2), else_exec as Rc<dyn Executor>);

    let top = build_branch_selector(true, &executor_map).await;
    top.execute().unwrap();

    assert_eq!(read_f32(&then_builder.tensor_at(OperandIndex(2)).unwrap().read_bytes()), vec![11.0]);
    assert_eq!(read_f32(&else_builder.tensor_at(OperandIndex(2)).unwrap().read_bytes()), vec![0.0], "the untaken branch must never run");
}

// Scenario 4: the Dataflow/Parallel memory policy (`FullLifetime`) must notify first-use for
// every registered operand ahead of `prepare`, regardless of where in the op-sequence it falls.
#[tokio::test]
async fn dataflow_marks_every_operand_first_used_before_prepare() {
    let shape = vec![1];
    let mut operands = Vec::new();
    for i in 0..10u32 {
        if matches!(i, 0 | 1 | 4 | 7) {
            operands.push(Operand::constant(shape.clone(), ElementType::F32, f32_bytes(&[i as f32])));
        } else {
            operands.push(Operand::new(shape.clone(), ElementType::F32, MemAllocClass::Static));
        }
    }
    let op_sequences = vec![OpSequence::new(vec![
        Operation::new(OpCode::Add, vec![Some(OperandIndex(0)), Some(OperandIndex(1))], vec![OperandIndex(2)]),
        Operation::new(OpCode::Relu, vec![Some(OperandIndex(2))], vec![OperandIndex(3)]),
        Operation::new(OpCode::Add, vec![Some(OperandIndex(3)), Some(OperandIndex(4))], vec![OperandIndex(5)]),
        Operation::new(OpCode::Relu, vec![Some(OperandIndex(5))], vec![OperandIndex(6)]),
        Operation::new(OpCode::Add, vec![Some(OperandIndex(6)), Some(OperandIndex(7))], vec![OperandIndex(8)]),
        Operation::new(OpCode::Relu, vec![Some(OperandIndex(8))], vec![OperandIndex(9)]),
    ])];
    let operand_lower_info: HashMap<_, _> = (0..10).map(|i| (OperandIndex(i), LowerInfoOperand::new(vec![def("cpu")]))).collect();
    let op_seq_lower_info = lower_info([(OpSequenceIndex(0), "cpu")]);
    let graph = LoweredGraph::new(operands, op_sequences, operand_lower_info, op_seq_lower_info, vec![], vec![OperandIndex(9)]);

    let builder = Rc::new(CpuTensorBuilder::new());
    let mut contexts = HashMap::new();
    contexts.insert(BackendId("cpu"), exec_backend_cpu::context_with_builder(builder.clone()).unwrap());

    let controlflow_builder = Rc::new(ControlFlowTensorBuilder::new());
    let options = CompilerOptions::new("Dataflow");
    let executor_map: ExecutorMap = Default::default();
    let _executor = create_dataflow_executor(graph, contexts, controlflow_builder, &options, &executor_map).await.unwrap();

    for i in 0..10 {
        assert!(builder.is_first_used(OperandIndex(i)), "operand {i} should be marked first-used under FullLifetime");
    }
}

// Scenario 5: profiling attaches exactly one profile observer on Dataflow and is rejected
// outright by Parallel (§5's worker-pool model has no single sync point to barrier against).
#[tokio::test]
async fn profiling_attaches_one_observer_on_dataflow_and_is_rejected_on_parallel() {
    fn two_backend_graph() -> LoweredGraph {
        let operands = vec![
            Operand::constant(vec![4], ElementType::F32, f32_bytes(&[1.0, 2.0, 3.0, 4.0])),
            Operand::constant(vec![4], ElementType::F32, f32_bytes(&[5.0, 6.0, 7.0, 8.0])),
            Operand::new(vec![4], ElementType::F32, MemAllocClass::Static),
            Operand::new(vec![4], ElementType::F32, MemAllocClass::Static),
        ];
        let op_sequences = vec![
            OpSequence::new(vec![Operation::new(OpCode::Add, vec![Some(OperandIndex(0)), Some(OperandIndex(1))], vec![OperandIndex(2)])]),
            OpSequence::new(vec![Operation::new(OpCode::Relu, vec![Some(OperandIndex(2))], vec![OperandIndex(3)])]),
        ];
        let mut operand_lower_info: HashMap<_, _> = (0..3).map(|i| (OperandIndex(i), LowerInfoOperand::new(vec![def("cpu")]))).collect();
        operand_lower_info.insert(OperandIndex(3), LowerInfoOperand::new(vec![def("accel")]));
        let op_seq_lower_info = lower_info([(OpSequenceIndex(0), "cpu"), (OpSequenceIndex(1), "accel")]);
        LoweredGraph::new(operands, op_sequences, operand_lower_info, op_seq_lower_info, vec![OperandIndex(0), OperandIndex(1)], vec![
            OperandIndex(3),
        ])
    }

    let mut contexts = HashMap::new();
    contexts.insert(BackendId("cpu"), exec_backend_cpu::context().unwrap());
    contexts.insert(BackendId("accel"), exec_backend_accel::context().unwrap());
    let controlflow_builder = Rc::new(ControlFlowTensorBuilder::new());
    let options = CompilerOptions::new("Dataflow").profiling(true);
    let executor_map: ExecutorMap = Default::default();
    let executor = create_dataflow_executor(two_backend_graph(), contexts, controlflow_builder, &options, &executor_map).await.unwrap();
    assert_eq!(executor.observer_count(), 1);

    let mut contexts = HashMap::new();
    contexts.insert(BackendId("cpu"), exec_backend_cpu::context().unwrap());
    contexts.insert(BackendId("accel"), exec_backend_accel::context().unwrap());
    let controlflow_builder = Rc::new(ControlFlowTensorBuilder::new());
    let options = CompilerOptions::new("Parallel").profiling(true);
    let executor_map: ExecutorMap = Default::default();
    let result = create_parallel_executor(two_backend_graph(), contexts, controlflow_builder, &options, &executor_map).await;
    assert!(result.is_err());
}

// Scenario 6: IO tensor initialization runs only for the primary subgraph.
#[tokio::test]
async fn io_tensors_are_initialized_for_the_primary_subgraph_only() {
    fn io_graph() -> LoweredGraph {
        let operands = vec![
            Operand::new(vec![4], ElementType::F32, MemAllocClass::Static),
            Operand::new(vec![4], ElementType::F32, MemAllocClass::Static),
            Operand::new(vec![4], ElementType::F32, MemAllocClass::Static),
        ];
        let op_sequences =
            vec![OpSequence::new(vec![Operation::new(OpCode::Relu, vec![Some(OperandIndex(0))], vec![OperandIndex(1)])])];
        let mut operand_lower_info: HashMap<_, _> = (0..2).map(|i| (OperandIndex(i), LowerInfoOperand::new(vec![def("cpu")]))).collect();
        operand_lower_info.insert(OperandIndex(2), LowerInfoOperand::new(vec![def("cpu")]));
        let op_seq_lower_info = lower_info([(OpSequenceIndex(0), "cpu")]);
        LoweredGraph::new(operands, op_sequences, operand_lower_info, op_seq_lower_info, vec![OperandIndex(0)], vec![OperandIndex(1)])
    }

    let mut contexts = HashMap::new();
    contexts.insert(BackendId("cpu"), exec_backend_cpu::context().unwrap());
    let controlflow_builder = Rc::new(ControlFlowTensorBuilder::new());
    let options = CompilerOptions::new("Linear").primary_subgraph(true);
    let executor_map: ExecutorMap = Default::default();
    create_linear_executor(io_graph(), contexts, controlflow_builder.clone(), &options, &executor_map).await.unwrap();
    assert_eq!(controlflow_builder.io_inputs(), vec![OperandIndex(0)]);
    assert_eq!(controlflow_builder.io_outputs(), vec![OperandIndex(1)]);

    let mut contexts = HashMap::new();
    contexts.insert(BackendId("cpu"), exec_backend_cpu::context().unwrap());
    let controlflow_builder = Rc::new(ControlFlowTensorBuilder::new());
    let options = CompilerOptions::new("Linear").primary_subgraph(false);
    let executor_map: ExecutorMap = Default::default();
    create_linear_executor(io_graph(), contexts, controlflow_builder.clone(), &options, &executor_map).await.unwrap();
    assert!(controlflow_builder.io_inputs().is_empty());
    assert!(controlflow_builder.io_outputs().is_empty());
}
