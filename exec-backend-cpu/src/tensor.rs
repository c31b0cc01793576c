use std::cell::RefCell;

use exec_backend::Tensor;
use exec_tensor_abi::ElementType;
use exec_utils::Label;

/// A CPU-resident tensor. Data is stored as raw bytes so the same type can back any
/// `ElementType`; kernels read/write through the typed helpers below.
pub struct CpuTensor {
    label: Label,
    shape: Vec<usize>,
    element_type: ElementType,
    data: RefCell<Vec<u8>>,
}

impl CpuTensor {
    pub fn zeroed(label: impl Into<Label>, shape: Vec<usize>, element_type: ElementType) -> Self {
        let count: usize = shape.iter().product();
        let data = vec![0u8; count * element_type.size_of()];
        Self { label: label.into(), shape, element_type, data: RefCell::new(data) }
    }

    pub fn read_f32(&self) -> Vec<f32> {
        self.data.borrow().chunks_exact(4).map(|b| f32::from_ne_bytes(b.try_into().unwrap())).collect()
    }

    pub fn write_f32(&self, values: &[f32]) {
        *self.data.borrow_mut() = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    }

    pub fn set_bytes(&self, bytes: Vec<u8>) {
        *self.data.borrow_mut() = bytes;
    }
}

impl Tensor for CpuTensor {
    fn label(&self) -> &str {
        self.label.as_ref()
    }

    fn shape(&self) -> &[usize] {
        &self.shape
    }

    fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// CPU tensors are plain host memory: any backend can read them directly, no copy required.
    fn is_portable(&self) -> bool {
        true
    }

    fn read_bytes(&self) -> Vec<u8> {
        self.data.borrow().clone()
    }

    fn write_bytes(&self, bytes: Vec<u8>) {
        self.set_bytes(bytes)
    }
}
