use std::rc::Rc;

use exec_ir::{BackendId, OperandIndex, OperationIndex};

use crate::{BackendConfig, ConstantInitializer, KernelGenerator, Optimizer, TensorBuilder, TensorRegister};

/// One per backend present in the graph. Created during lowering (external to this crate);
/// owned by the factory call for the duration of construction.
pub struct BackendContext {
    pub backend: BackendId,
    pub config: Rc<dyn BackendConfig>,
    pub optimizer: Option<Rc<dyn Optimizer>>,
    pub constant_initializer: Rc<dyn ConstantInitializer>,
    pub kernel_generator: Rc<dyn KernelGenerator>,
    pub tensor_register: Option<Rc<dyn TensorRegister>>,
    pub tensor_builder: Rc<dyn TensorBuilder>,
    operation_list: Vec<OperationIndex>,
    operand_list: Vec<OperandIndex>,
}

impl BackendContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        backend: BackendId,
        config: Rc<dyn BackendConfig>,
        optimizer: Option<Rc<dyn Optimizer>>,
        constant_initializer: Rc<dyn ConstantInitializer>,
        kernel_generator: Rc<dyn KernelGenerator>,
        tensor_register: Option<Rc<dyn TensorRegister>>,
        tensor_builder: Rc<dyn TensorBuilder>,
    ) -> Self {
        Self {
            backend,
            config,
            optimizer,
            constant_initializer,
            kernel_generator,
            tensor_register,
            tensor_builder,
            operation_list: Vec::new(),
            operand_list: Vec::new(),
        }
    }

    /// Hands the backend the operation indices it owns and the operand indices it defines,
    /// computed from the lowered graph's backend assignment.
    pub fn initialize(&mut self, operation_list: Vec<OperationIndex>, operand_list: Vec<OperandIndex>) {
        self.operation_list = operation_list;
        self.operand_list = operand_list;
    }

    pub fn owned_operations(&self) -> &[OperationIndex] {
        &self.operation_list
    }

    pub fn owned_operands(&self) -> &[OperandIndex] {
        &self.operand_list
    }
}
