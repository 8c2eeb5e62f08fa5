//! Errores específicos del core.
//!
//! Taxonomía: `MissingField` corresponde a errores de configuración (se
//! detectan antes de invocar), `Invocation`/`Timeout` a fallos del Action
//! Target. Todos abortan el pase de convergencia en curso; ninguno se
//! recupera localmente.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreError {
    /// Falta un campo requerido en el Configuration Payload (fail-fast,
    /// previo a cualquier invocación).
    #[error("missing required payload field: {0}")]
    MissingField(String),
    /// El Action Target reportó un fallo. No hay retry en esta capa.
    #[error("action target invocation failed: {0}")]
    Invocation(String),
    /// El Action Target no respondió dentro de la espera acotada.
    #[error("action target did not respond within {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
    /// El recurso lógico no existe en el ledger del stack.
    #[error("unknown logical resource: {0}")]
    UnknownResource(String),
    /// El resultado publicado no puede resolverse: el trigger no está en
    /// estado Applied (falla ruidosamente en lugar de entregar un valor
    /// parcial o viejo).
    #[error("result for '{logical_id}' unavailable: trigger state is {state}")]
    ResultUnavailable { logical_id: String, state: String },
    /// El resultado existe pero no contiene el campo pedido.
    #[error("result for '{logical_id}' has no field '{field}'")]
    ResultFieldMissing { logical_id: String, field: String },
    #[error("internal: {0}")]
    Internal(String),
}
