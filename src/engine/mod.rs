pub mod constants;
pub mod context;
pub mod cursor;
pub mod error;
pub mod pcap;

pub use context::{CaptureConfig, FRAME_BUFFER_CAPACITY, SourceConfig};
pub use cursor::Cursor;
pub use error::{CaptureError, DecodeError, SourceError};
