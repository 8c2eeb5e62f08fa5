//! stack-adapters: Capa de adaptación Dominio ↔ Core
//!
//! Este crate provee:
//! - Los Action Targets concretos (`DbInitializerTarget`) que el motor de
//!   convergencia invoca.
//! - La construcción del Configuration Payload del inicializador a partir de
//!   tipos validados del dominio (fail-fast de configuración).
//! - Dobles de prueba (`RecordingTarget`, `FailingTarget`, `SlowTarget`)
//!   compartidos por los tests del workspace.
//!
//! Nota: el core sólo conoce `ActionTarget` y `ConfigPayload`; la semántica
//! de los campos vive aquí.

pub mod payloads;
pub mod targets;

pub use payloads::{db_init_payload, DbInitInputs};
pub use targets::DbInitializerTarget;
