use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, trace, warn};

use super::{Acquire, FrameSource};
use crate::engine::error::SourceError;
use crate::engine::pcap::{GLOBAL_HEADER_LEN, LINKTYPE_ETHERNET, PcapHeader, read_record};

/// Replays the records of a classic pcap file, one per acquisition.
#[derive(Debug)]
pub struct PcapSource {
    data: Vec<u8>,
    header: PcapHeader,
    offset: usize,
}

impl PcapSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let data = fs::read(path).map_err(SourceError::Unavailable)?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, SourceError> {
        let header = PcapHeader::parse(&data)?;
        debug!(
            "pcap v{}.{} snaplen={} link_type={} {}",
            header.version.0,
            header.version.1,
            header.snaplen,
            header.link_type,
            if header.nanosecond { "ns" } else { "us" }
        );
        if header.link_type != LINKTYPE_ETHERNET {
            warn!(
                "capture link type is {}, not Ethernet; headers may not decode meaningfully",
                header.link_type
            );
        }

        Ok(Self {
            data,
            header,
            offset: GLOBAL_HEADER_LEN,
        })
    }

    pub fn header(&self) -> &PcapHeader {
        &self.header
    }
}

impl FrameSource for PcapSource {
    fn acquire(&mut self, buf: &mut [u8]) -> Result<Acquire, SourceError> {
        let Some((record, next)) = read_record(&self.data, self.offset, &self.header)? else {
            return Ok(Acquire::Exhausted);
        };
        self.offset = next;

        trace!(
            "pcap record at {}: {} bytes",
            Timestamp {
                sec: record.timestamp_sec,
                subsec: record.timestamp_subsec,
                nanosecond: self.header.nanosecond,
            },
            record.data.len()
        );

        if record.original_len as usize > record.data.len() {
            debug!(
                "pcap record holds {} of {} wire bytes",
                record.data.len(),
                record.original_len
            );
        }

        let len = record.data.len().min(buf.len());
        if len < record.data.len() {
            debug!(
                "pcap record of {} bytes cut to buffer capacity {}",
                record.data.len(),
                buf.len()
            );
        }
        buf[..len].copy_from_slice(&record.data[..len]);

        Ok(Acquire::Frame(len))
    }
}

/// Record time as `seconds.fraction`, with six or nine fraction digits.
struct Timestamp {
    sec: u32,
    subsec: u32,
    nanosecond: bool,
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nanosecond {
            write!(f, "{}.{:09}", self.sec, self.subsec)
        } else {
            write!(f, "{}.{:06}", self.sec, self.subsec)
        }
    }
}
