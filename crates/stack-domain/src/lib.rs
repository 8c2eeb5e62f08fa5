// stack-domain library entry point
pub mod boundary;
pub mod error;
pub mod network;
pub mod policy;
pub mod secret;
pub use boundary::{ExecutionBoundary, InvokerPolicy};
pub use error::DomainError;
pub use network::{IngressRule, NetworkPlacement, SecurityGroupHandle};
pub use policy::{AccessGrant, AccessPolicySet};
pub use secret::SecretRef;
