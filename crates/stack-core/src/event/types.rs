//! Tipos de evento de convergencia y estructura `ConvergeEvent`.
//!
//! Rol en el flujo:
//! - Cada pase del `ConvergenceEngine` emite eventos a un `EventStore`
//!   append-only.
//! - Estos eventos permiten reconstruir el estado del `StackLedger` (replay)
//!   sin depender de estructuras mutables.
//! - El enum `ConvergeEventKind` define el contrato observable y estable del
//!   motor.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::model::{Fingerprint, PhysicalId};

/// Tipos de eventos soportados.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ConvergeEventKind {
    /// Emisión inicial de un stack: fija el `plan_hash` y la cantidad de
    /// recursos. Invariante: debe ser el primer evento de un `stack_id`.
    /// Ambos campos describen el plan del primer pase y no se refrescan si
    /// el plan cambia después; el estado vigente de cada pase posterior se
    /// lee de sus propios eventos.
    StackInitialized { plan_hash: String, resource_count: usize },
    /// El trigger decidió invocar: la identidad candidata difiere de la
    /// última registrada (primer pase o configuración cambiada). No implica
    /// éxito.
    InvocationStarted {
        logical_id: String,
        physical_id: PhysicalId,
        fingerprint: Fingerprint,
    },
    /// El Action Target terminó correctamente; la identidad física y el
    /// Invocation Result pasan a ser los vigentes del recurso.
    InvocationApplied {
        logical_id: String,
        physical_id: PhysicalId,
        fingerprint: Fingerprint,
        result: serde_json::Value,
    },
    /// La identidad candidata coincide con la registrada: no hay invocación.
    /// Se registra para que la idempotencia sea observable en el log.
    InvocationSkipped {
        logical_id: String,
        physical_id: PhysicalId,
    },
    /// El Action Target reportó error o venció la espera acotada. El pase no
    /// continúa (stop-on-failure).
    InvocationFailed {
        logical_id: String,
        physical_id: PhysicalId,
        error: CoreError,
    },
    /// El recurso lógico salió del plan. No se invoca ninguna acción
    /// compensatoria; el evento queda como rastro auditable.
    ResourceRemoved { logical_id: String },
    /// Cierre de un pase exitoso, con fingerprint agregado (hash de las
    /// identidades físicas vigentes en orden de plan).
    PassCompleted { pass_fingerprint: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergeEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub stack_id: Uuid,
    pub kind: ConvergeEventKind,
    pub ts: DateTime<Utc>, // metadato (no entra en fingerprint)
}
