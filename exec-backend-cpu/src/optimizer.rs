use exec_backend::{Optimizer, Result};

/// The CPU backend performs no local rewrites; it exists to exercise the factory pipeline, not to
/// demonstrate optimization passes.
pub struct CpuOptimizer;

impl Optimizer for CpuOptimizer {
    fn optimize(&self) -> Result<()> {
        Ok(())
    }
}
