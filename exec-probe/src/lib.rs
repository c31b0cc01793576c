//! A small async tensor-readout utility: a `Channel` a host attaches to an executor's observer
//! callback, paired with a `Probe` the host awaits after a run to retrieve the tensor's final
//! bytes. Standalone so integration tests (and any real host embedding the factory) can depend on
//! it without pulling in factory internals.

mod channel;
mod error;
mod probe;

pub use channel::Channel;
pub use error::Error;
pub use probe::Probe;

pub type Result<T> = error::Result<T>;
