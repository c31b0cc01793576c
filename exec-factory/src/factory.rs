use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use exec_backend::{BackendContext, Executor, ExecutorMap};
use exec_backend_controlflow::ControlFlowTensorBuilder;
use exec_ir::{BackendId, LoweredGraph};

use crate::{
    config::CompilerOptions,
    executors::{create_dataflow_executor, create_linear_executor, create_parallel_executor},
    Error, Result,
};

type BuildFuture<'a> = Pin<Box<dyn Future<Output = Result<Rc<dyn Executor>>> + 'a>>;
type StrategyFn =
    for<'a> fn(LoweredGraph, HashMap<BackendId, BackendContext>, Rc<ControlFlowTensorBuilder>, &'a CompilerOptions, &'a ExecutorMap) -> BuildFuture<'a>;

fn build_linear<'a>(
    graph: LoweredGraph,
    backend_contexts: HashMap<BackendId, BackendContext>,
    controlflow_builder: Rc<ControlFlowTensorBuilder>,
    options: &'a CompilerOptions,
    executor_map: &'a ExecutorMap,
) -> BuildFuture<'a> {
    Box::pin(async move { Ok(create_linear_executor(graph, backend_contexts, controlflow_builder, options, executor_map).await? as Rc<dyn Executor>) })
}

fn build_dataflow<'a>(
    graph: LoweredGraph,
    backend_contexts: HashMap<BackendId, BackendContext>,
    controlflow_builder: Rc<ControlFlowTensorBuilder>,
    options: &'a CompilerOptions,
    executor_map: &'a ExecutorMap,
) -> BuildFuture<'a> {
    Box::pin(async move { Ok(create_dataflow_executor(graph, backend_contexts, controlflow_builder, options, executor_map).await? as Rc<dyn Executor>) })
}

fn build_parallel<'a>(
    graph: LoweredGraph,
    backend_contexts: HashMap<BackendId, BackendContext>,
    controlflow_builder: Rc<ControlFlowTensorBuilder>,
    options: &'a CompilerOptions,
    executor_map: &'a ExecutorMap,
) -> BuildFuture<'a> {
    Box::pin(async move { Ok(create_parallel_executor(graph, backend_contexts, controlflow_builder, options, executor_map).await? as Rc<dyn Executor>) })
}

/// A registry of named executor-construction strategies, constructed as an explicit value rather
/// than reached for as a process-wide singleton (spec §9). `create` looks up `options.executor` by
/// name and runs the matching strategy's construction pipeline.
///
/// `executor_map` is read during construction (a nested `If` op-sequence's kernel generation looks
/// up sibling subgraphs already built) but never written here: per spec §5, the map is "populated
/// bottom-up by the caller across nested subgraphs", not by the factory itself. A caller building a
/// subgraph with nested `If`s must build the nested subgraphs first, insert each into
/// `executor_map` under its `SubgraphId`, then call `create` for the enclosing graph.
pub struct ExecutorFactory {
    strategies: HashMap<&'static str, StrategyFn>,
}

impl ExecutorFactory {
    pub fn new() -> Self {
        let mut strategies: HashMap<&'static str, StrategyFn> = HashMap::new();
        strategies.insert("Linear", build_linear as StrategyFn);
        strategies.insert("Dataflow", build_dataflow as StrategyFn);
        strategies.insert("Parallel", build_parallel as StrategyFn);
        Self { strategies }
    }

    pub async fn create(
        &self,
        graph: LoweredGraph,
        backend_contexts: HashMap<BackendId, BackendContext>,
        controlflow_builder: Rc<ControlFlowTensorBuilder>,
        options: &CompilerOptions,
        executor_map: &ExecutorMap,
    ) -> Result<Rc<dyn Executor>> {
        let strategy = self.strategies.get(options.executor.as_str()).ok_or_else(|| Error::UnknownStrategy(options.executor.clone()))?;
        strategy(graph, backend_contexts, controlflow_builder, options, executor_map).await
    }
}

impl Default for ExecutorFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_strategy_name_is_rejected() {
        let factory = ExecutorFactory::new();
        let graph = LoweredGraph::new(Vec::new(), Vec::new(), HashMap::new(), HashMap::new(), Vec::new(), Vec::new());
        let options = CompilerOptions::new("Quantum");
        let executor_map: ExecutorMap = Default::default();
        let controlflow_builder = Rc::new(ControlFlowTensorBuilder::new());
        let result = factory.create(graph, HashMap::new(), controlflow_builder, &options, &executor_map).await;
        assert!(matches!(result, Err(Error::UnknownStrategy(name)) if name == "Quantum"));
    }
}
