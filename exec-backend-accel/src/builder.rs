use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use exec_backend::{Error, MemoryPolicy, OperandInfo, Result, Tensor, TensorBuilder};
use exec_ir::OperandIndex;

use crate::tensor::AccelTensor;

#[derive(Default)]
pub struct AccelTensorBuilder {
    tensors: RefCell<HashMap<OperandIndex, Rc<AccelTensor>>>,
    migrant: RefCell<HashMap<OperandIndex, Rc<dyn Tensor>>>,
    first_use: RefCell<HashSet<OperandIndex>>,
}

impl AccelTensorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn native_tensor(&self, operand: OperandIndex) -> Option<Rc<AccelTensor>> {
        self.tensors.borrow().get(&operand).cloned()
    }

    pub fn is_first_used(&self, operand: OperandIndex) -> bool {
        self.first_use.borrow().contains(&operand)
    }
}

impl TensorBuilder for AccelTensorBuilder {
    fn is_registered(&self, operand: OperandIndex) -> bool {
        self.tensors.borrow().contains_key(&operand) || self.migrant.borrow().contains_key(&operand)
    }

    fn register_tensor_info(&self, operand: OperandIndex, info: OperandInfo) -> Result<()> {
        let label = format!("accel:{}", operand.0);
        let tensor = AccelTensor::zeroed(label, info.shape, info.element_type);
        self.tensors.borrow_mut().insert(operand, Rc::new(tensor));
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
