pub mod core;
pub mod plan;

pub use self::core::{ConvergenceEngine, PassOutcome, PassReport, ResourceOutcome};
pub use plan::{build_stack_plan, InitializerSpec, StackPlan};
