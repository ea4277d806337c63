pub mod buffer;
pub mod hexdump;
pub mod record;

pub use buffer::FrameBuffer;
pub use hexdump::HexDump;
pub use record::{DecodedRecord, MacAddr};
