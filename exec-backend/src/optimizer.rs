use crate::Result;

/// Backend-local rewrites applied to the operations a backend owns, before linearization.
/// Optimizations never cross backend boundaries.
pub trait Optimizer {
    fn optimize(&self) -> Result<()>;
}
