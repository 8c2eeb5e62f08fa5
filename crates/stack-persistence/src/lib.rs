//! stack-persistence: log de eventos durable para el motor de convergencia.
//!
//! Implementa el `EventStore` del core sobre archivos JSON Lines, uno por
//! stack. La durabilidad del log es lo que hace que la identidad física
//! sobreviva entre despliegues.

pub mod config;
pub mod error;
pub mod jsonl;

pub use config::{init_dotenv, StateConfig};
pub use error::PersistenceError;
pub use jsonl::JsonlEventStore;
