use crate::{BackendId, Error, Layout, OperandIndex};

/// Where and in what layout an operand is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DefFactor {
    pub backend: BackendId,
    pub layout: Layout,
}

/// Per-operand lowering metadata: the set of backends (and layouts) that produce this operand.
/// Model inputs and outputs, and any operand that is the output of some operation, carry exactly
/// one def-factor unless a custom tensor register is supplied for the owning backend.
#[derive(Clone, Debug, Default)]
pub struct LowerInfoOperand {
    pub def_factors: Vec<DefFactor>,
}

impl LowerInfoOperand {
    pub fn new(def_factors: Vec<DefFactor>) -> Self {
        Self { def_factors }
    }

    /// Returns the single def-factor for this operand, failing if there is none or more than one.
    /// This is the hard invariant the original runtime enforces via `getOnlyElement()`.
    pub fn only_def_factor(&self, operand: OperandIndex) -> Result<&DefFactor, Error> {
        match self.def_factors.as_slice() {
            [one] => Ok(one),
            [] => Err(Error::MissingDefFactor(operand)),
            many => Err(Error::AmbiguousDefFactor(operand, many.len())),
        }
    }
}

/// Per-op-sequence lowering metadata: exactly one backend, one frontend layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LowerInfoOpSeq {
    pub backend: BackendId,
    pub layout: Layout,
}
