//! Output sinks for decoded records.

use std::io::{self, Write};

use crate::packet::{DecodedRecord, HexDump};

pub trait OutputSink {
    /// Consumes one record. `frame` is the captured frame it was decoded
    /// from and is only valid for the duration of the call.
    fn emit(&mut self, record: &DecodedRecord, frame: &[u8]) -> io::Result<()>;
}

/// Writes one text line per record, optionally followed by a hex dump.
#[derive(Debug)]
pub struct WriteSink<W> {
    writer: W,
    hexdump: bool,
}

impl<W: Write> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            hexdump: false,
        }
    }

    pub fn with_hexdump(mut self, enabled: bool) -> Self {
        self.hexdump = enabled;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriteSink<W> {
    fn emit(&mut self, record: &DecodedRecord, frame: &[u8]) -> io::Result<()> {
        writeln!(self.writer, "{record}")?;
        if self.hexdump {
            writeln!(self.writer, "{}", HexDump(frame))?;
        }
        Ok(())
    }
}

/// Collects records in memory.
impl OutputSink for Vec<DecodedRecord> {
    fn emit(&mut self, record: &DecodedRecord, _frame: &[u8]) -> io::Result<()> {
        self.push(*record);
        Ok(())
    }
}

impl<O: OutputSink + ?Sized> OutputSink for &mut O {
    fn emit(&mut self, record: &DecodedRecord, frame: &[u8]) -> io::Result<()> {
        (**self).emit(record, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::MacAddr;

    fn record() -> DecodedRecord {
        DecodedRecord {
            length: 14,
            destination: MacAddr([0xff; 6]),
            source: MacAddr([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]),
            protocol: 0x86dd,
        }
    }

    #[test]
    fn writes_one_line_per_record() {
        let mut sink = WriteSink::new(Vec::new());
        sink.emit(&record(), &[0; 14]).expect("write to vec");
        sink.emit(&record(), &[0; 14]).expect("write to vec");

        let out = String::from_utf8(sink.into_inner()).expect("utf8");
        let expected = "Packet (14 bytes): Destination: |ff:ff:ff:ff:ff:ff| Source: |00:11:22:33:44:55| Protocol: |0x86dd|\n";
        assert_eq!(out, expected.repeat(2));
    }

    #[test]
    fn hexdump_follows_the_record_line() {
        let mut sink = WriteSink::new(Vec::new()).with_hexdump(true);
        let frame = [0x41u8; 14];
        sink.emit(&record(), &frame).expect("write to vec");

        let out = String::from_utf8(sink.into_inner()).expect("utf8");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("0000   41 41"));
        assert!(lines[1].ends_with("AAAAAAAAAAAAAA"));
        assert!(lines[2].is_empty());
    }

    #[test]
    fn vec_sink_collects_records() {
        let mut records: Vec<DecodedRecord> = Vec::new();
        records.emit(&record(), &[]).expect("infallible");
        assert_eq!(records, vec![record()]);
    }
}
