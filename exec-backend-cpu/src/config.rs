use exec_backend::{BackendConfig, Result};

/// The CPU backend is always synchronous, so `sync` has nothing to wait for.
pub struct CpuConfig;

impl BackendConfig for CpuConfig {
    fn sync(&self) -> Result<()> {
        Ok(())
    }
}
