use std::cell::RefCell;

use exec_backend::Tensor;
use exec_tensor_abi::ElementType;
use exec_utils::Label;

/// A model input or output. Owned by the control-flow tensor registry; exposed to the host as
/// the public IO handle. Portable so a primary subgraph's feed/fetch can be wired directly into
/// whichever backend consumes or produces it.
pub struct UserTensor {
    label: Label,
    shape: Vec<usize>,
    element_type: ElementType,
    data: RefCell<Vec<u8>>,
}

impl UserTensor {
    pub fn zeroed(label: impl Into<Label>, shape: Vec<usize>, element_type: ElementType) -> Self {
        let count: usize = shape.iter().product();
        let data = vec![0u8; count * element_type.size_of()];
        Self { label: label.into(), shape, element_type, data: RefCell::new(data) }
    }
}

impl Tensor for UserTensor {
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
        true
    }

    fn read_bytes(&self) -> Vec<u8> {
        self.data.borrow().clone()
    }

    fn write_bytes(&self, bytes: Vec<u8>) {
        *self.data.borrow_mut() = bytes;
    }
}
