use std::fmt;

use crate::engine::constants::MAC_LEN;

/// A link-layer address shown exactly as captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; MAC_LEN]);

impl MacAddr {
    pub fn octets(&self) -> [u8; MAC_LEN] {
        self.0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// One decoded frame, ready for output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedRecord {
    /// Total bytes captured for the frame, not just the header.
    pub length: usize,
    pub destination: MacAddr,
    pub source: MacAddr,
    /// EtherType or 802.3 length, host order.
    pub protocol: u16,
}

impl fmt::Display for DecodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Packet ({} bytes): Destination: |{}| Source: |{}| Protocol: |0x{:04x}|",
            self.length, self.destination, self.source, self.protocol
        )
    }
}
