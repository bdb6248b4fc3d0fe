//! # Jogpad Communication
//!
//! Line transmission to the machine controller. The jog engine only needs an
//! ordered, fire-and-forget "send line" operation; the sinks here provide it
//! over a writer (stdout, a device node), a tokio channel to a transport
//! task, or an in-memory recorder.

pub mod sink;

pub use sink::{ChannelSink, CommandSink, NoOpSink, RecordingSink, WriterSink};
