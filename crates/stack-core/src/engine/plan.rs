//! Plan de stack: el estado deseado que se entrega al engine en cada pase.
//!
//! El plan es inmutable durante un pase. Cada entrada declara un recurso
//! lógico con su Configuration Payload y el Action Target a invocar; el
//! caller lo reconstruye en cada pase (no hay campos mutables compartidos
//! entre pases).
use std::sync::Arc;
use std::time::Duration;

use crate::constants::DEFAULT_INVOKE_TIMEOUT_MS;
use crate::hashing::{hash_str, to_canonical_json};
use crate::model::ConfigPayload;
use crate::trigger::ActionTarget;

/// Declaración de un inicializador one-shot dentro del plan.
pub struct InitializerSpec {
    /// Nombre lógico estable del recurso (constante entre despliegues).
    pub logical_id: String,
    /// Payload de configuración del pase actual.
    pub payload: ConfigPayload,
    /// Acción externa a invocar.
    pub target: Arc<dyn ActionTarget>,
    /// Espera acotada para la invocación.
    pub timeout: Duration,
}

impl InitializerSpec {
    pub fn new(logical_id: impl Into<String>, payload: ConfigPayload, target: Arc<dyn ActionTarget>) -> Self {
        Self { logical_id: logical_id.into(),
               payload,
               target,
               timeout: Duration::from_millis(DEFAULT_INVOKE_TIMEOUT_MS) }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Definición inmutable del plan de un pase.
pub struct StackPlan {
    pub resources: Vec<InitializerSpec>,
    pub plan_hash: String,
}

impl StackPlan {
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Construye el plan y su hash a partir de los ids lógicos en orden.
pub fn build_stack_plan(resources: Vec<InitializerSpec>) -> StackPlan {
    let ids: Vec<&str> = resources.iter().map(|r| r.logical_id.as_str()).collect();
    let ids_json = serde_json::json!(ids);
    let plan_hash = hash_str(&to_canonical_json(&ids_json));
    StackPlan { resources, plan_hash }
}
