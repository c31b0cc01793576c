use exec_backend::Observer;
use exec_ir::BackendId;

/// Attached when `CompilerOptions::trace_filepath` is set. The tracing file format itself is an
/// external collaborator (out of scope); this only proves attachment by emitting a `tracing` event
/// per completed op-sequence.
pub struct TracingObserver {
    filepath: String,
}

impl TracingObserver {
    pub fn new(filepath: impl Into<String>) -> Self {
        Self { filepath: filepath.into() }
    }

    pub fn filepath(&self) -> &str {
        &self.filepath
    }
}

impl Observer for TracingObserver {
    fn name(&self) -> &str {
        "tracing"
    }

    fn on_op_sequence_complete(&self, op_seq: usize) {
        tracing::info!(filepath = %self.filepath, op_seq, "op-sequence complete");
    }
}

/// Attached when `he_profiling_mode` is set on a non-parallel dataflow build (spec §8 invariant:
/// Parallel attaches none, Dataflow attaches exactly one), parameterized by the backends present.
pub struct ProfileObserver {
    backends: Vec<BackendId>,
}

impl ProfileObserver {
    pub fn new(backends: Vec<BackendId>) -> Self {
        Self { backends }
    }

    pub fn backends(&self) -> &[BackendId] {
        &self.backends
    }
}

impl Observer for ProfileObserver {
    fn name(&self) -> &str {
        "profile"
    }

    fn on_op_sequence_complete(&self, op_seq: usize) {
        tracing::debug!(backends = ?self.backends, op_seq, "profiled op-sequence");
    }
}
