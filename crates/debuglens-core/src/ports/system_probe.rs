//! System probe port for memory queries.
//!
//! This port abstracts OS memory inspection from the core domain.
//! Implementations live in adapters (e.g., debuglens-runtime).

/// Port for querying system memory.
///
/// Both queries return `None` when the platform cannot report the value.
/// Callers must treat `None` as "unknown", never as "plenty".
pub trait SystemProbePort: Send + Sync {
    /// Memory currently available for new allocations, in bytes.
    fn available_memory_bytes(&self) -> Option<u64>;

    /// Total installed memory, in bytes.
    fn total_memory_bytes(&self) -> Option<u64>;
}
