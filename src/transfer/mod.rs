// src/transfer/mod.rs
//! Transfer module - chunked sending, the inter-app channel, and the periodic task.

pub mod channel;
pub mod engine;
pub mod sched;

// Re-export commonly used types
pub use channel::{parse_request, ChunkFileSink, MessageChannel, MessageKind};
pub use engine::{TransferEngine, TransferEvent, TransferState};
pub use sched::{PeriodicTask, TaskPriority};
