use crate::Result;

/// A backend's synchronization handle. Asynchronous backends (anything that can run a kernel
/// without blocking the calling thread) implement `sync` as a blocking wait for outstanding work;
/// synchronous backends can make it a no-op.
pub trait BackendConfig {
    fn sync(&self) -> Result<()>;
}
