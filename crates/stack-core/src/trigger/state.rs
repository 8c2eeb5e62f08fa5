use std::fmt;

use serde::{Deserialize, Serialize};

/// Estado del Lifecycle Trigger para un recurso lógico.
///
/// Las transiciones válidas son:
/// - `Absent` -> `Pending`
/// - `Applied` -> `Pending` (cambió fingerprint o versión)
/// - `Failed` -> `Pending`
/// - `Pending` -> `Applied` | `Failed`
/// - cualquiera -> `Removed` (el recurso salió del plan)
///
/// `Removed` es terminal y no dispara ninguna invocación compensatoria: el
/// sistema reacciona sólo a create/update, nunca a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerState {
    /// Sin invocación previa registrada.
    Absent,
    /// Invocación en vuelo (serializada: nunca más de una por recurso).
    Pending,
    /// Invocación exitosa; identidad física y resultado vigentes.
    Applied,
    /// El Action Target reportó error o venció la espera acotada.
    Failed,
    /// El recurso lógico fue eliminado del plan. Terminal.
    Removed,
}

impl fmt::Display for TriggerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TriggerState::Absent => "Absent",
            TriggerState::Pending => "Pending",
            TriggerState::Applied => "Applied",
            TriggerState::Failed => "Failed",
            TriggerState::Removed => "Removed",
        };
        f.write_str(s)
    }
}
