//! Fingerprint de invocación e identidad física.
//!
//! Rol en el flujo:
//! - `Fingerprint` deriva determinísticamente del Configuration Payload
//!   canonicalizado; payloads estructuralmente iguales producen el mismo
//!   fingerprint y cualquier diferencia a nivel de bytes canónicos produce
//!   uno distinto (hash resistente a colisiones, truncado).
//! - `PhysicalId` combina nombre lógico + versión del target + fingerprint.
//!   Es el token durable que el engine declarativo usa para decidir "misma
//!   instancia" vs. "instancia de reemplazo". Se crea en la primera
//!   convergencia exitosa, se reemplaza cuando cambia fingerprint o versión,
//!   nunca se muta in place.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{FINGERPRINT_LEN, PHYSICAL_ID_INFIX};
use crate::hashing::hash_value;
use crate::model::ConfigPayload;

/// Prefijo corto (hex) del digest canónico de un payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint de un Configuration Payload. Función pura, sin efectos.
    pub fn of(payload: &ConfigPayload) -> Self {
        let full = hash_value(&payload.to_value());
        Self(full[..FINGERPRINT_LEN].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identidad física: `{logical}-AwsSdkCall-{version}{fingerprint}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysicalId(String);

impl PhysicalId {
    pub fn new(logical_id: &str, version: u32, fingerprint: &Fingerprint) -> Self {
        Self(format!("{}-{}-{}{}", logical_id, PHYSICAL_ID_INFIX, version, fingerprint))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhysicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
