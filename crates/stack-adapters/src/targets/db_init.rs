//! DbInitializerTarget: la acción one-shot de inicialización de la base.
//!
//! - Consume las referencias de secretos y del cluster del Configuration
//!   Payload y simula la creación del esquema + usuario de aplicación.
//! - No accede a IO externo; la lógica real de negocio del inicializador es
//!   un colaborador externo fuera de alcance, así que aquí el resultado se
//!   deriva determinísticamente del payload.
//! - El motor decide cuándo invocarlo; subir `version` fuerza una
//!   re-invocación con payload idéntico.
use serde_json::{json, Value};

use stack_core::{ActionTarget, ConfigPayload, CoreError};

/// Campos requeridos del payload del inicializador.
pub const REQUIRED_FIELDS: [&str; 4] = ["credsSecretName", "dbSecretName", "dbClusterArn", "dbName"];

#[derive(Debug, Clone)]
pub struct DbInitializerTarget {
    version: u32,
}

impl DbInitializerTarget {
    pub fn new() -> Self {
        Self { version: 1 }
    }

    /// Sube la versión del target (p. ej. tras corregir la lógica de
    /// inicialización) para forzar una nueva corrida.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }
}

impl Default for DbInitializerTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionTarget for DbInitializerTarget {
    fn name(&self) -> &str {
        "db-schema-init"
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn invoke(&self, payload: &ConfigPayload) -> Result<Value, CoreError> {
        // El target revalida los campos requeridos aunque el caller haga
        // fail-fast al construir el payload.
        for field in REQUIRED_FIELDS {
            payload.require(field)?;
        }
        let db_name = payload.require_str("dbName")?;
        let cluster = payload.require_str("dbClusterArn")?;
        let creds = payload.require_str("credsSecretName")?;

        // Resultado determinista de la "inicialización": nombre del secreto
        // de aplicación generado y rastro de lo aplicado.
        Ok(json!({
            "appSecretName": format!("{db_name}-app-user"),
            "schemaApplied": true,
            "cluster": cluster,
            "sourceCredsSecret": creds,
            "initializerVersion": self.version,
        }))
    }
}
