//! Constantes del motor de convergencia.
//!
//! Este módulo agrupa valores estáticos que participan en el cálculo de
//! fingerprints e identidades físicas. Cambios en estas constantes pueden
//! afectar la reproducibilidad si forman parte del input del hashing
//! (`ENGINE_VERSION` sí lo es).

/// Versión lógica del motor. Se incluye en el fingerprint agregado de cada
/// pase para que un cambio incompatible del engine invalide los fingerprints
/// aunque el plan y los payloads no cambien. Mantener estable mientras no
/// haya cambios incompatibles.
pub const ENGINE_VERSION: &str = "SF1.0";

/// Longitud (en caracteres hex) del prefijo de digest usado como fingerprint
/// de invocación. El fingerprint sólo distingue "igual vs. distinto", no es
/// material de seguridad; un prefijo corto mantiene legible la identidad
/// física resultante.
pub const FINGERPRINT_LEN: usize = 12;

/// Infijo fijo de la identidad física: `{logical}-AwsSdkCall-{version}{fp}`.
/// Consumido por el engine declarativo como token de identidad del recurso.
pub const PHYSICAL_ID_INFIX: &str = "AwsSdkCall";

/// Espera máxima por defecto para una invocación del Action Target, en
/// milisegundos. Superarla se trata como fallo de la invocación.
pub const DEFAULT_INVOKE_TIMEOUT_MS: u64 = 300_000;
