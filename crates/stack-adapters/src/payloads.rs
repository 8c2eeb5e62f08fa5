//! Construcción del Configuration Payload del inicializador a partir de
//! tipos del dominio.
//!
//! Hace el fail-fast de configuración: toda referencia requerida debe estar
//! presente y válida antes de que exista un plan que invocar.
use stack_core::ConfigPayload;
use stack_domain::{DomainError, SecretRef};

/// Entradas del inicializador de base de datos.
pub struct DbInitInputs<'a> {
    /// Secreto con las credenciales administrativas del cluster.
    pub creds_secret: &'a SecretRef,
    /// Secreto con los datos de conexión de la base a inicializar.
    pub db_secret: &'a SecretRef,
    pub db_cluster_arn: &'a str,
    pub db_name: &'a str,
}

/// Payload canónico del inicializador. Las claves son parte del contrato
/// request/response con el target.
pub fn db_init_payload(inputs: &DbInitInputs<'_>) -> Result<ConfigPayload, DomainError> {
    if inputs.db_cluster_arn.trim().is_empty() {
        return Err(DomainError::ValidationError("dbClusterArn must not be empty".to_string()));
    }
    if inputs.db_name.trim().is_empty() {
        return Err(DomainError::ValidationError("dbName must not be empty".to_string()));
    }
    Ok(ConfigPayload::new()
        .with("credsSecretName", inputs.creds_secret.name())
        .with("dbSecretName", inputs.db_secret.name())
        .with("dbClusterArn", inputs.db_cluster_arn)
        .with("dbName", inputs.db_name))
}
