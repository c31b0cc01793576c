use exec_backend::{BackendConfig, Result};

/// Invoking a sibling subgraph's executor is synchronous from this backend's point of view.
pub struct ControlFlowConfig;

impl BackendConfig for ControlFlowConfig {
    fn sync(&self) -> Result<()> {
        Ok(())
    }
}
