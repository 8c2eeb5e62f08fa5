pub mod state;
pub mod target;

pub use state::TriggerState;
pub use target::ActionTarget;
