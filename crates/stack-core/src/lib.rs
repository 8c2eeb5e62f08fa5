//! stack-core: motor de convergencia con inicializador idempotente
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod ledger;
pub mod model;
pub mod publisher;
pub mod trigger;

pub use engine::{build_stack_plan, ConvergenceEngine, InitializerSpec, PassReport, ResourceOutcome, StackPlan};
pub use errors::CoreError;
pub use event::{ConvergeEvent, ConvergeEventKind, EventStore, InMemoryEventStore};
pub use ledger::{InMemoryStackLedger, ResourceRecord, StackInstance, StackLedger};
pub use model::{ConfigPayload, Fingerprint, PhysicalId};
pub use publisher::{DeferredField, ResultPublisher};
pub use trigger::{ActionTarget, TriggerState};
