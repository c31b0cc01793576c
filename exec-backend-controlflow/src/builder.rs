use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use exec_backend::{Error, MemoryPolicy, OperandInfo, Result, Tensor, TensorBuilder};
use exec_ir::{Layout, OperandIndex};
use exec_tensor_abi::ElementType;

use crate::user_tensor::UserTensor;

/// The control-flow backend's tensor registry. In addition to the ordinary `TensorBuilder`
/// contract, it is where the IO Tensor Initializer installs model-visible input/output tensors,
/// ahead of (and independent from) the ordinary tensor registration pass.
#[derive(Default)]
pub struct ControlFlowTensorBuilder {
    tensors: RefCell<HashMap<OperandIndex, Rc<UserTensor>>>,
    migrant: RefCell<HashMap<OperandIndex, Rc<dyn Tensor>>>,
    first_use: RefCell<HashSet<OperandIndex>>,
    io_inputs: RefCell<Vec<OperandIndex>>,
    io_outputs: RefCell<Vec<OperandIndex>>,
}

impl ControlFlowTensorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a model-visible `UserTensor` for an input or output operand, in the caller's
    /// chosen layout. Distinct from `register_tensor_info`: it is called directly by the IO
    /// Tensor Initializer rather than by the tensor registration pass.
    pub fn register_user_tensor(&self, operand: OperandIndex, shape: Vec<usize>, element_type: ElementType, _layout: Layout) {
        let label = format!("io:{}", operand.0);
        self.tensors.borrow_mut().insert(operand, Rc::new(UserTensor::zeroed(label, shape, element_type)));
    }

    pub fn record_input(&self, operand: OperandIndex) {
        self.io_inputs.borrow_mut().push(operand);
    }

    pub fn record_output(&self, operand: OperandIndex) {
        self.io_outputs.borrow_mut().push(operand);
    }

    pub fn io_inputs(&self) -> Vec<OperandIndex> {
        self.io_inputs.borrow().clone()
    }

    pub fn io_outputs(&self) -> Vec<OperandIndex> {
        self.io_outputs.borrow().clone()
    }

    pub fn native_tensor(&self, operand: OperandIndex) -> Option<Rc<UserTensor>> {
        self.tensors.borrow().get(&operand).cloned()
    }

    pub fn is_first_used(&self, operand: OperandIndex) -> bool {
        self.first_use.borrow().contains(&operand)
    }
}

impl TensorBuilder for ControlFlowTensorBuilder {
    fn is_registered(&self, operand: OperandIndex) -> bool {
        self.tensors.borrow().contains_key(&operand) || self.migrant.borrow().contains_key(&operand)
    }

    fn register_tensor_info(&self, operand: OperandIndex, info: OperandInfo) -> Result<()> {
        let label = format!("cf:{}", operand.0);
        self.tensors.borrow_mut().insert(operand, Rc::new(UserTensor::zeroed(label, info.shape, info.element_type)));
        Ok(())
    }

    fn tensor_at(&self, operand: OperandIndex) -> Option<Rc<dyn Tensor>> {
        if let Some(tensor) = self.tensors.borrow().get(&operand) {
            return Some(tensor.clone() as Rc<dyn Tensor>);
        }
        self.migrant.borrow().get(&operand).cloned()
    }

    fn set_migrant_tensor(&self, operand: OperandIndex, tensor: Rc<dyn Tensor>) -> Result<()> {
        if !tensor.is_portable() {
            return Err(Error::NotPortable(operand));
        }
        self.migrant.borrow_mut().insert(operand, tensor);
        Ok(())
    }

    fn notify_first_use(&self, operand: OperandIndex) {
        self.first_use.borrow_mut().insert(operand);
    }

    fn prepare(&self, _policy: MemoryPolicy) -> Result<()> {
        Ok(())
    }

    fn allocate(&self) -> Result<()> {
        Ok(())
    }

    fn post_function_prepare(&self) -> Result<()> {
        Ok(())
    }
}
