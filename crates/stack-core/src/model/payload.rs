//! Configuration Payload: los parámetros nombrados que consume un Action
//! Target.
//!
//! - Respaldado por `BTreeMap` para que la serialización sea estable sin
//!   importar el orden de inserción.
//! - Inmutable una vez construido para un pase de convergencia dado; la
//!   igualdad entre payloads es igualdad estructural profunda.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;

/// Mapa de parámetros nombrados para una invocación.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigPayload {
    fields: BTreeMap<String, Value>,
}

impl ConfigPayload {
    pub fn new() -> Self {
        Self { fields: BTreeMap::new() }
    }

    /// Estilo builder: agrega un campo y devuelve el payload.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Acceso opcional a un campo.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Acceso a un campo requerido. Su ausencia es un error de configuración
    /// (fail-fast, previo a cualquier invocación).
    pub fn require(&self, key: &str) -> Result<&Value, CoreError> {
        self.fields
            .get(key)
            .ok_or_else(|| CoreError::MissingField(key.to_string()))
    }

    /// Variante de `require` para campos string.
    pub fn require_str(&self, key: &str) -> Result<&str, CoreError> {
        self.require(key)?
            .as_str()
            .ok_or_else(|| CoreError::MissingField(key.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Serialización estable como objeto JSON (claves en orden del BTreeMap).
    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.fields).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigPayload;
    use crate::errors::CoreError;

    #[test]
    fn equality_is_structural_and_order_independent() {
        let a = ConfigPayload::new()
            .with("credsSecretName", "a")
            .with("dbSecretName", "b");
        let b = ConfigPayload::new()
            .with("dbSecretName", "b")
            .with("credsSecretName", "a");
        assert_eq!(a, b, "insertion order must not affect equality");
        assert_eq!(a.to_value(), b.to_value());
    }

    #[test]
    fn require_missing_field_is_configuration_error() {
        let p = ConfigPayload::new().with("dbSecretName", "b");
        match p.require("credsSecretName") {
            Err(CoreError::MissingField(f)) => assert_eq!(f, "credsSecretName"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }
}
