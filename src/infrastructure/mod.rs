pub mod core;
pub mod line_protocol;
pub mod mock;
pub mod nicehash;

pub use line_protocol::LineProtocolWriter;
pub use nicehash::NiceHashClient;
