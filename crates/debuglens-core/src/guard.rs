//! Pre-flight memory gate.
//!
//! The inference engine manages its own memory, so this is only a cheap
//! circuit breaker for when the OS is already critically low. It reserves
//! nothing.

use std::sync::Arc;

use serde::Serialize;

use crate::ports::SystemProbePort;

/// Bytes in one GB, as the gate and status reports count them.
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Snapshot of a single gate evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryCheck {
    /// Available memory reported by the probe, if it could be read.
    pub available_bytes: Option<u64>,
    /// Total memory reported by the probe, if it could be read.
    pub total_bytes: Option<u64>,
    /// Configured floor in GB.
    pub minimum_gb: f64,
    pub sufficient: bool,
}

/// Answers whether enough free memory exists to run inference.
pub struct ResourceGuard {
    probe: Arc<dyn SystemProbePort>,
    min_free_gb: f64,
}

impl ResourceGuard {
    pub fn new(probe: Arc<dyn SystemProbePort>, min_free_gb: f64) -> Self {
        Self { probe, min_free_gb }
    }

    /// Whether at least `minimum_gb` of memory is available.
    ///
    /// An unreadable memory figure counts as insufficient.
    pub fn has_enough_memory(&self, minimum_gb: f64) -> bool {
        self.probe
            .available_memory_bytes()
            .is_some_and(|bytes| bytes_to_gb(bytes) >= minimum_gb)
    }

    /// Evaluate the gate against the configured floor.
    pub fn check(&self) -> MemoryCheck {
        MemoryCheck {
            available_bytes: self.probe.available_memory_bytes(),
            total_bytes: self.probe.total_memory_bytes(),
            minimum_gb: self.min_free_gb,
            sufficient: self.has_enough_memory(self.min_free_gb),
        }
    }
}

/// Convert a byte count to GB.
#[allow(clippy::cast_precision_loss)]
pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(Option<u64>);

    impl SystemProbePort for FixedProbe {
        fn available_memory_bytes(&self) -> Option<u64> {
            self.0
        }

        fn total_memory_bytes(&self) -> Option<u64> {
            Some(16 * 1024 * 1024 * 1024)
        }
    }

    fn guard(available: Option<u64>) -> ResourceGuard {
        ResourceGuard::new(Arc::new(FixedProbe(available)), 0.3)
    }

    #[test]
    fn test_enough_memory_above_floor() {
        let g = guard(Some(2 * 1024 * 1024 * 1024));
        assert!(g.has_enough_memory(0.3));
        assert!(g.check().sufficient);
    }

    #[test]
    fn test_floor_is_inclusive() {
        let g = guard(Some(1024 * 1024 * 1024));
        assert!(g.has_enough_memory(1.0));
        assert!(!g.has_enough_memory(1.01));
    }

    #[test]
    fn test_below_floor_is_insufficient() {
        // 200 MB free against a 0.3 GB floor
        let g = guard(Some(200 * 1024 * 1024));
        assert!(!g.has_enough_memory(0.3));
        assert!(!g.check().sufficient);
    }

    #[test]
    fn test_unknown_memory_fails_safe() {
        let g = guard(None);
        assert!(!g.has_enough_memory(0.0));
        let check = g.check();
        assert!(!check.sufficient);
        assert_eq!(check.available_bytes, None);
    }

    #[test]
    fn test_zero_floor_admits_any_known_value() {
        let g = ResourceGuard::new(Arc::new(FixedProbe(Some(1))), 0.0);
        assert!(g.check().sufficient);
    }

    #[test]
    fn test_check_agrees_with_named_gate_at_the_floor() {
        let cases = [
            (Some(1024 * 1024 * 1024), true),
            (Some(1024 * 1024 * 1023), false),
        ];
        for (available, expected) in cases {
            let g = ResourceGuard::new(Arc::new(FixedProbe(available)), 1.0);
            assert_eq!(g.has_enough_memory(1.0), expected);
            assert_eq!(g.check().sufficient, expected);
        }
    }

    #[test]
    fn test_bytes_to_gb() {
        assert!((bytes_to_gb(3 * 1024 * 1024 * 1024) - 3.0).abs() < f64::EPSILON);
        assert!((bytes_to_gb(512 * 1024 * 1024) - 0.5).abs() < f64::EPSILON);
    }
}
