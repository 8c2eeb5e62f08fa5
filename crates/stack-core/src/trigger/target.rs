use serde_json::Value;

use crate::errors::CoreError;
use crate::model::ConfigPayload;

/// Trait que define un Action Target: la unidad de trabajo externa invocada
/// por sus efectos secundarios (p. ej. inicializar un esquema de base de
/// datos).
///
/// El engine serializa las invocaciones por recurso lógico; la implementación
/// no necesita sincronización propia, pero debe ser `Send + Sync` porque la
/// espera acotada corre la invocación en un worker aparte.
pub trait ActionTarget: Send + Sync {
    /// Nombre estable del target (entra en trazas y políticas de invocación).
    fn name(&self) -> &str;

    /// Versión del target. Subirla fuerza una re-invocación aunque el
    /// Configuration Payload sea byte-idéntico (p. ej. tras corregir un bug
    /// en el propio target).
    fn version(&self) -> u32 {
        1
    }

    /// Ejecuta la acción. Consume el payload de configuración y devuelve el
    /// Invocation Result o un error estructurado. Los reintentos, si
    /// existen, son responsabilidad del entorno de ejecución del target, no
    /// de esta capa.
    fn invoke(&self, payload: &ConfigPayload) -> Result<Value, CoreError>;
}
