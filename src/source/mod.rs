//! Frame sources: anything that can fill a buffer with one frame at a time.

pub mod pcap;
#[cfg(target_os = "linux")]
pub mod raw_socket;

use crate::engine::error::SourceError;

pub use pcap::PcapSource;
#[cfg(target_os = "linux")]
pub use raw_socket::RawSocket;

/// Outcome of a single acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire {
    /// A frame of this many bytes was written to the front of the buffer.
    Frame(usize),
    /// The wait ended without a frame (timeout or signal).
    Idle,
    /// A finite source has nothing left.
    Exhausted,
}

pub trait FrameSource {
    /// Blocks until a frame arrives, the wait is cut short, or an error
    /// occurs. Implementations must not write past `buf.len()` and must
    /// report the number of bytes actually written.
    fn acquire(&mut self, buf: &mut [u8]) -> Result<Acquire, SourceError>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn acquire(&mut self, buf: &mut [u8]) -> Result<Acquire, SourceError> {
        (**self).acquire(buf)
    }
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn acquire(&mut self, buf: &mut [u8]) -> Result<Acquire, SourceError> {
        (**self).acquire(buf)
    }
}
