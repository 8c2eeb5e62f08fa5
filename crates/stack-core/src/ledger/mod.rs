pub mod types;

pub use types::{InMemoryStackLedger, ResourceRecord, StackInstance, StackLedger};
