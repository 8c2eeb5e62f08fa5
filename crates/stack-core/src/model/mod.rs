pub mod identity;
pub mod payload;

pub use identity::{Fingerprint, PhysicalId};
pub use payload::ConfigPayload;
