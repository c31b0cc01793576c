use exec_ir::Layout;
use exec_tensor_abi::ElementType;

/// Backend-specific registration metadata for an operand, produced by the tensor registration
/// pass after permuting the operand's shape into the backend's layout.
#[derive(Clone, Debug)]
pub struct OperandInfo {
    pub shape: Vec<usize>,
    pub element_type: ElementType,
    pub is_constant: bool,
    pub layout: Layout,
}
