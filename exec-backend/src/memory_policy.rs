/// Governs how long a tensor builder retains a tensor's memory. `Linear` execution can compute
/// tight use/def lifetimes from the linearized order; `Dataflow`/`Parallel` execution offers no
/// such static guarantee and conservatively retains every tensor for the executor's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryPolicy {
    UseDefLifetime,
    FullLifetime,
}
