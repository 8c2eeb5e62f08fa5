use serde::{Deserialize, Serialize};

use crate::DomainError;
use std::fmt;

/// Referencia a un secreto en el almacén de credenciales.
///
/// El dominio sólo maneja la referencia (nombre), nunca el material del
/// secreto; la rotación y el contenido quedan fuera de alcance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretRef {
    name: String,
}

impl SecretRef {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError("secret reference name must not be empty".to_string()));
        }
        if trimmed.contains(char::is_whitespace) {
            return Err(DomainError::ValidationError(format!("secret reference '{trimmed}' must not contain whitespace")));
        }
        Ok(SecretRef { name: trimmed.to_string() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<secret: {}>", self.name)
    }
}
