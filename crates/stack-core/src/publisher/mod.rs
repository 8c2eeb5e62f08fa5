//! Result Publisher: expone un campo del Invocation Result como valor
//! diferido.
//!
//! El publisher no guarda estado propio: `field(..)` sólo construye un token
//! (`DeferredField`) que otros recursos declarados pueden referenciar. La
//! resolución ocurre contra el engine (`ConvergenceEngine::resolve`) por
//! replay del ledger, de modo que los lectores observan un valor consistente
//! únicamente tras una convergencia exitosa.
use serde::{Deserialize, Serialize};

/// Vista publicadora sobre el resultado de un recurso lógico.
#[derive(Debug, Clone)]
pub struct ResultPublisher {
    logical_id: String,
}

impl ResultPublisher {
    pub fn for_resource(logical_id: impl Into<String>) -> Self {
        Self { logical_id: logical_id.into() }
    }

    /// Único accessor: referencia diferida a un campo del resultado.
    pub fn field(&self, name: &str) -> DeferredField {
        DeferredField { logical_id: self.logical_id.clone(),
                        field: name.to_string() }
    }
}

/// Token diferido: se resuelve sólo cuando el trigger del recurso está en
/// Applied. Serializable para poder incrustarlo en declaraciones de otros
/// recursos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredField {
    pub logical_id: String,
    pub field: String,
}
