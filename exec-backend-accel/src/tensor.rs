use std::cell::RefCell;

use exec_backend::Tensor;
use exec_tensor_abi::ElementType;
use exec_utils::Label;

/// A tensor resident in the accelerator's own memory space. Unlike `exec-backend-cpu`'s tensors,
/// these are not portable: a foreign backend cannot consume them without an explicit copy, which
/// is outside this crate's scope (the spec treats the non-portable case as "consumer copies,
/// outside this spec").
pub struct AccelTensor {
    label: Label,
    shape: Vec<usize>,
    element_type: ElementType,
    data: RefCell<Vec<u8>>,
}

impl AccelTensor {
    pub fn zeroed(label: impl Into<Label>, shape: Vec<usize>, element_type: ElementType) -> Self {
        let count: usize = shape.iter().product();
        let data = vec![0u8; count * element_type.size_of()];
        Self { label: label.into(), shape, element_type, data: RefCell::new(data) }
    }

    pub fn set_bytes(&self, bytes: Vec<u8>) {
        *self.data.borrow_mut() = bytes;
    }
}

impl Tensor for AccelTensor {
    fn label(&self) -> &str {
        self.label.as_ref()
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn element_type(&self) -> ElementType {
        self.element_type
    }

    fn is_portable(&self) -> bool {
        false
    }

    fn read_bytes(&self) -> Vec<u8> {
        self.data.borrow().clone()
    }

    fn write_bytes(&self, bytes: Vec<u8>) {
        self.set_bytes(bytes)
    }
}
