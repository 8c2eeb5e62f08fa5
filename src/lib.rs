//! stackflow: topología de despliegue declarativa con inicializador
//! idempotente de base de datos.
pub mod config;
pub mod topology;

pub use config::{StackConfig, CONFIG};
pub use topology::{StackTopology, DB_INIT_LOGICAL_ID};
