//! Errores de persistencia.
//! Mapea errores de IO / decodificación a variantes semánticas del dominio
//! de persistencia.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("state io error: {0}")]
    Io(String),
    #[error("corrupt event record: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt(err.to_string())
    }
}
