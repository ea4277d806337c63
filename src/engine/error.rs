use std::io;

use thiserror::Error;

/// Failure to decode a header out of a byte window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes than a full Ethernet II header were captured.
    #[error("truncated frame: needed {needed} bytes, available {available}")]
    TruncatedFrame { needed: usize, available: usize },
}

/// Errors raised by a frame source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be opened (permissions, missing interface, ...).
    #[error("frame source unavailable: {0}")]
    Unavailable(#[source] io::Error),

    #[error("unknown interface: {0}")]
    UnknownInterface(String),

    /// A receive or read call failed on an open source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A capture file does not follow the pcap layout.
    #[error("malformed capture file: {0}")]
    Malformed(&'static str),
}

/// Conditions that end a capture loop.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("acquisition failed: {0}")]
    AcquisitionFailed(#[source] SourceError),

    /// The source claims to have written more bytes than the buffer holds.
    #[error("frame source reported {reported} bytes for a {capacity}-byte buffer")]
    LengthViolation { reported: usize, capacity: usize },

    #[error("output sink failed: {0}")]
    Output(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_lengths() {
        let err = DecodeError::TruncatedFrame {
            needed: 14,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "truncated frame: needed 14 bytes, available 5"
        );

        let err = CaptureError::LengthViolation {
            reported: 70_000,
            capacity: 65_536,
        };
        assert_eq!(
            err.to_string(),
            "frame source reported 70000 bytes for a 65536-byte buffer"
        );
    }

    #[test]
    fn acquisition_failure_keeps_source_chain() {
        use std::error::Error as _;

        let err = CaptureError::AcquisitionFailed(SourceError::Io(io::Error::other("link down")));
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("I/O error: link down"));
    }
}
