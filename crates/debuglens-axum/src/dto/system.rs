//! System information DTOs.

use debuglens_core::{MemoryCheck, bytes_to_gb};
use serde::{Deserialize, Serialize};

/// Resource gate status for the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStatusDto {
    /// Available memory in bytes. Absent if the OS could not be queried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_gb: Option<f64>,
    /// Free memory floor in GB.
    pub minimum_gb: f64,
    /// Whether an analysis request would pass the gate right now.
    pub sufficient: bool,
}

impl From<MemoryCheck> for MemoryStatusDto {
    fn from(check: MemoryCheck) -> Self {
        Self {
            available_bytes: check.available_bytes,
            total_bytes: check.total_bytes,
            available_gb: check
                .available_bytes
                .map(|bytes| (bytes_to_gb(bytes) * 100.0).round() / 100.0),
            minimum_gb: check.minimum_gb,
            sufficient: check.sufficient,
        }
    }
}
