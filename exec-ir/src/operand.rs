use std::cell::RefCell;

use exec_tensor_abi::ElementType;

/// Whether an operand's memory is sized once at plan time (`Static`) or resized at runtime
/// (`Dynamic`, e.g. control-flow outputs whose shape depends on a branch taken).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemAllocClass {
    Static,
    Dynamic,
}

/// A single tensor slot in the lowered graph: shape, element type, allocation class, whether it
/// is a constant, and (for constants) the source-side data buffer.
///
/// `source_data` is released after constant initialization (`release_data`) per the ordering
/// invariant: no kernel may run before that release happens.
#[derive(Debug)]
pub struct Operand {
    pub shape: Vec<usize>,
    pub element_type: ElementType,
    pub alloc_class: MemAllocClass,
    pub is_constant: bool,
    source_data: RefCell<Option<Vec<u8>>>,
}

impl Operand {
    pub fn new(shape: Vec<usize>, element_type: ElementType, alloc_class: MemAllocClass) -> Self {
        Self { shape, element_type, alloc_class, is_constant: false, source_data: RefCell::new(None) }
    }

    pub fn constant(shape: Vec<usize>, element_type: ElementType, data: Vec<u8>) -> Self {
        Self {
            shape,
            element_type,
            alloc_class: MemAllocClass::Static,
            is_constant: true,
            source_data: RefCell::new(Some(data)),
        }
    }

    pub fn has_source_data(&self) -> bool {
        self.source_data.borrow().is_some()
    }

    /// Copies the source-side data out without releasing it. Used by constant initialization.
    pub fn source_data(&self) -> Option<Vec<u8>> {
        self.source_data.borrow().clone()
    }

    /// Drops the source-side buffer. Must only be called after every backend has finished
    /// initializing its own constant storage from it.
    pub fn release_data(&self) {
        self.source_data.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_data_clears_the_source_buffer() {
        let operand = Operand::constant(vec![2], ElementType::F32, vec![0; 8]);
        assert!(operand.has_source_data());
        operand.release_data();
        assert!(!operand.has_source_data());
    }
}
