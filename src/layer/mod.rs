pub mod capture; // acquire / decode / emit loop
pub mod datalink; // Layer 2 - Ethernet II header

pub use capture::{CancelToken, CaptureLoop, CaptureStats, CaptureSummary, Step, StopReason};
