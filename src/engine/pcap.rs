use super::cursor::Cursor;
use super::error::SourceError;

pub const GLOBAL_HEADER_LEN: usize = 24;
pub const RECORD_HEADER_LEN: usize = 16;
pub const LINKTYPE_ETHERNET: u32 = 1;

/// The global header of a classic libpcap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcapHeader {
    pub little_endian: bool,
    pub nanosecond: bool,
    pub version: (u16, u16),
    pub snaplen: u32,
    pub link_type: u32,
}

#[derive(Debug, Clone)]
pub struct PcapRecord<'a> {
    pub timestamp_sec: u32,
    pub timestamp_subsec: u32,
    /// Length of the frame on the wire, which may exceed `data.len()`.
    pub original_len: u32,
    pub data: &'a [u8],
}

impl PcapHeader {
    pub fn parse(input: &[u8]) -> Result<Self, SourceError> {
        if input.len() < GLOBAL_HEADER_LEN {
            return Err(SourceError::Malformed("file shorter than the pcap global header"));
        }

        let magic = [input[0], input[1], input[2], input[3]];
        let (little_endian, nanosecond) = match magic {
            [0xd4, 0xc3, 0xb2, 0xa1] => (true, false),
            [0x4d, 0x3c, 0xb2, 0xa1] => (true, true),
            [0xa1, 0xb2, 0xc3, 0xd4] => (false, false),
            [0xa1, 0xb2, 0x3c, 0x4d] => (false, true),
            _ => return Err(SourceError::Malformed("unknown pcap magic number")),
        };

        let short = SourceError::Malformed("file shorter than the pcap global header");
        let mut cursor = Cursor::new(&input[4..GLOBAL_HEADER_LEN]);
        let (Some(major), Some(minor)) = (
            cursor.read_u16(little_endian),
            cursor.read_u16(little_endian),
        ) else {
            return Err(short);
        };
        // thiszone and sigfigs are always zero in practice
        if cursor.read_exact(8).is_none() {
            return Err(short);
        }
        let (Some(snaplen), Some(link_type)) = (
            cursor.read_u32(little_endian),
            cursor.read_u32(little_endian),
        ) else {
            return Err(short);
        };

        Ok(Self {
            little_endian,
            nanosecond,
            version: (major, minor),
            snaplen,
            link_type,
        })
    }
}

/// Reads the record starting at `offset`.
///
/// Returns the record and the offset of the one after it, or `None` once
/// `offset` sits exactly at the end of the input.
pub fn read_record<'a>(
    input: &'a [u8],
    offset: usize,
    header: &PcapHeader,
) -> Result<Option<(PcapRecord<'a>, usize)>, SourceError> {
    let rest = input
        .get(offset..)
        .ok_or(SourceError::Malformed("record offset past end of file"))?;
    if rest.is_empty() {
        return Ok(None);
    }
    if rest.len() < RECORD_HEADER_LEN {
        return Err(SourceError::Malformed("truncated pcap record header"));
    }

    let le = header.little_endian;
    let mut cursor = Cursor::new(rest);
    let fields = (
        cursor.read_u32(le),
        cursor.read_u32(le),
        cursor.read_u32(le),
        cursor.read_u32(le),
    );
    let (Some(ts_sec), Some(ts_subsec), Some(incl_len), Some(orig_len)) = fields else {
        return Err(SourceError::Malformed("truncated pcap record header"));
    };

    let data = cursor
        .read_exact(incl_len as usize)
        .ok_or(SourceError::Malformed("pcap record extends past end of file"))?;

    Ok(Some((
        PcapRecord {
            timestamp_sec: ts_sec,
            timestamp_subsec: ts_subsec,
            original_len: orig_len,
            data,
        },
        offset + cursor.pos(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcap_le(frames: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&[0xd4, 0xc3, 0xb2, 0xa1]);
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&4u16.to_le_bytes());
        out.extend_from_slice(&[0; 8]);
        out.extend_from_slice(&65_535u32.to_le_bytes());
        out.extend_from_slice(&LINKTYPE_ETHERNET.to_le_bytes());
        for (i, frame) in frames.iter().enumerate() {
            out.extend_from_slice(&(i as u32).to_le_bytes());
            out.extend_from_slice(&0u32.to_le_bytes());
            out.extend_from_slice(&(frame.len() as u32).to_le_bytes());
            out.extend_from_slice(&(frame.len() as u32).to_le_bytes());
            out.extend_from_slice(frame);
        }
        out
    }

    #[test]
    fn parses_little_endian_header() {
        let bytes = pcap_le(&[]);
        let header = PcapHeader::parse(&bytes).expect("header should parse");
        assert!(header.little_endian);
        assert!(!header.nanosecond);
        assert_eq!(header.version, (2, 4));
        assert_eq!(header.snaplen, 65_535);
        assert_eq!(header.link_type, LINKTYPE_ETHERNET);
    }

    #[test]
    fn parses_big_endian_nanosecond_header() {
        let mut bytes = vec![0xa1, 0xb2, 0x3c, 0x4d, 0x00, 0x02, 0x00, 0x04];
        bytes.extend_from_slice(&[0; 8]);
        bytes.extend_from_slice(&[0x00, 0x00, 0x04, 0x00]);
        bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]);

        let header = PcapHeader::parse(&bytes).expect("header should parse");
        assert!(!header.little_endian);
        assert!(header.nanosecond);
        assert_eq!(header.snaplen, 1024);
    }

    #[test]
    fn walks_records_until_end() {
        let bytes = pcap_le(&[&[1, 2, 3], &[4, 5]]);
        let header = PcapHeader::parse(&bytes).expect("header should parse");

        let (first, next) = read_record(&bytes, GLOBAL_HEADER_LEN, &header)
            .expect("record should parse")
            .expect("record should exist");
        assert_eq!(first.data, &[1, 2, 3]);
        assert_eq!(first.timestamp_sec, 0);

        let (second, next) = read_record(&bytes, next, &header)
            .expect("record should parse")
            .expect("record should exist");
        assert_eq!(second.data, &[4, 5]);
        assert_eq!(second.original_len, 2);

        assert!(matches!(read_record(&bytes, next, &header), Ok(None)));
    }

    #[test]
    fn rejects_bad_magic_and_short_records() {
        assert!(matches!(
            PcapHeader::parse(&[0u8; 24]),
            Err(SourceError::Malformed(_))
        ));
        assert!(PcapHeader::parse(&[0xd4, 0xc3]).is_err());

        let mut bytes = pcap_le(&[&[1, 2, 3, 4]]);
        bytes.truncate(bytes.len() - 1);
        let header = PcapHeader::parse(&bytes).expect("header should parse");
        assert!(read_record(&bytes, GLOBAL_HEADER_LEN, &header).is_err());

        let bytes = pcap_le(&[]);
        let mut padded = bytes.clone();
        padded.extend_from_slice(&[0; 5]);
        assert!(read_record(&padded, GLOBAL_HEADER_LEN, &header).is_err());
    }
}
