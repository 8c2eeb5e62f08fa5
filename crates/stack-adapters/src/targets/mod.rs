pub mod db_init;
pub mod doubles;

pub use db_init::DbInitializerTarget;
pub use doubles::{FailingTarget, RecordingTarget, SlowTarget};
