//! Transports delivering one decoded envelope per call.

pub mod stdio;

pub use stdio::StdioTransport;
