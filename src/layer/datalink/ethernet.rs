//! Ethernet II header decoding.
//!
//! Only the fixed 14-byte prefix is interpreted: destination address, source
//! address and the type/length field. Nothing past byte 13 is ever read.

use crate::engine::constants::{ETHERNET_HEADER_LEN, MAC_LEN};
use crate::engine::cursor::Cursor;
use crate::engine::error::DecodeError;
use crate::packet::{DecodedRecord, MacAddr};

/// Network-to-host conversion for a 16-bit field.
///
/// `octets` is the pair exactly as it appeared on the wire, most significant
/// octet first. The value is assembled from the octets themselves rather than
/// by swapping a host-native integer, so the result is the same on big- and
/// little-endian machines.
pub fn ntohs_pair(octets: [u8; 2]) -> u16 {
    let [high, low] = octets;
    (u16::from(high) << 8) | u16::from(low)
}

/// Borrowed view over the first 14 bytes of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthernetHeader<'a> {
    pub destination: &'a [u8; MAC_LEN],
    pub source: &'a [u8; MAC_LEN],
    /// Host order.
    pub type_or_length: u16,
}

impl<'a> EthernetHeader<'a> {
    pub fn parse(window: &'a [u8]) -> Result<Self, DecodeError> {
        let truncated = DecodeError::TruncatedFrame {
            needed: ETHERNET_HEADER_LEN,
            available: window.len(),
        };

        let header = window.get(..ETHERNET_HEADER_LEN).ok_or(truncated)?;
        let mut cursor = Cursor::new(header);
        let destination = cursor.read_array::<MAC_LEN>().ok_or(truncated)?;
        let source = cursor.read_array::<MAC_LEN>().ok_or(truncated)?;
        let type_field = cursor.read_array::<2>().ok_or(truncated)?;

        Ok(Self {
            destination,
            source,
            type_or_length: ntohs_pair(*type_field),
        })
    }

    /// Builds the output record; `frame_len` is the full captured length.
    pub fn to_record(&self, frame_len: usize) -> DecodedRecord {
        DecodedRecord {
            length: frame_len,
            destination: MacAddr(*self.destination),
            source: MacAddr(*self.source),
            protocol: self.type_or_length,
        }
    }
}

/// Decodes a whole captured frame into a record.
pub fn decode(frame: &[u8]) -> Result<DecodedRecord, DecodeError> {
    let header = EthernetHeader::parse(frame)?;
    Ok(header.to_record(frame.len()))
}
