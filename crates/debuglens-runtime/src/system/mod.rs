//! System probe implementation for debuglens-runtime.
//!
//! `DefaultSystemProbe` implements `SystemProbePort` from debuglens-core by
//! querying the OS through `sysinfo`. Tool discovery for the `check` command
//! lives in [`commands`].

pub mod commands;

use debuglens_core::SystemProbePort;
use sysinfo::System;

pub use commands::{get_command_version, tool_version};

/// Default implementation of `SystemProbePort`.
///
/// Every call takes a fresh memory reading; nothing is cached between
/// requests.
///
/// # Example
///
/// ```ignore
/// use debuglens_runtime::system::DefaultSystemProbe;
/// use debuglens_core::SystemProbePort;
///
/// let probe = DefaultSystemProbe::new();
/// let free = probe.available_memory_bytes();
/// ```
pub struct DefaultSystemProbe;

impl DefaultSystemProbe {
    /// Create a new default system probe.
    pub const fn new() -> Self {
        Self
    }

    fn memory_snapshot() -> System {
        let mut sys = System::new();
        sys.refresh_memory();
        sys
    }
}

impl Default for DefaultSystemProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProbePort for DefaultSystemProbe {
    fn available_memory_bytes(&self) -> Option<u64> {
        // sysinfo reports 0 on platforms where the figure is unsupported.
        Some(Self::memory_snapshot().available_memory()).filter(|&bytes| bytes > 0)
    }

    fn total_memory_bytes(&self) -> Option<u64> {
        Some(Self::memory_snapshot().total_memory()).filter(|&bytes| bytes > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_never_exceeds_total() {
        let probe = DefaultSystemProbe::new();
        if let (Some(available), Some(total)) =
            (probe.available_memory_bytes(), probe.total_memory_bytes())
        {
            assert!(available <= total, "available {available} > total {total}");
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_reports_memory() {
        let probe = DefaultSystemProbe::new();
        assert!(probe.total_memory_bytes().is_some());
        assert!(probe.available_memory_bytes().is_some());
    }
}
