use std::time::Duration;

use super::constants::ETH_P_ALL;

/// Capacity of the reusable frame buffer (64 KiB).
pub const FRAME_BUFFER_CAPACITY: usize = 65_536;

/// Settings for the capture loop itself.
#[derive(Debug, Clone, Default)]
pub struct CaptureConfig {
    /// Stop once this many records have been emitted. `None` runs until
    /// cancelled or until the source fails.
    pub max_records: Option<u64>,
}

/// Settings handed to a live frame source when it is opened.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Bind to a single interface; `None` listens on all of them.
    pub interface: Option<String>,
    /// Link-layer protocol value in host order. It is converted to network
    /// order before reaching the kernel.
    pub protocol: u16,
    /// Upper bound on a single blocking wait, so cancellation is observed
    /// even on an idle link. `None` blocks indefinitely.
    pub read_timeout: Option<Duration>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            interface: None,
            protocol: ETH_P_ALL,
            read_timeout: Some(Duration::from_millis(500)),
        }
    }
}
