pub mod engine;
pub mod layer;
pub mod packet;
pub mod sink;
pub mod source;

pub use engine::{CaptureConfig, CaptureError, DecodeError, SourceConfig, SourceError};
pub use layer::datalink::{EthernetHeader, decode, ntohs_pair};
pub use layer::{CancelToken, CaptureLoop, CaptureStats, CaptureSummary, Step, StopReason};
pub use packet::{DecodedRecord, FrameBuffer, MacAddr};
pub use sink::{OutputSink, WriteSink};
pub use source::{Acquire, FrameSource, PcapSource};
