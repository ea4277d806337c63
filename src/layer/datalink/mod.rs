//! The datalink layer (Layer 2).
//! Decoding stops at the EtherType boundary; payloads are never inspected.

pub mod ethernet;

pub use ethernet::{EthernetHeader, decode, ntohs_pair};
