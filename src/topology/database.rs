//! Declaración del cluster relacional serverless y sus secretos.
use stack_domain::{DomainError, SecretRef, SecurityGroupHandle};

use crate::config::StackConfig;
use crate::topology::network::NetworkOutputs;

/// Record de salida de la base: referencias que consumen el inicializador y
/// el servicio.
#[derive(Debug, Clone)]
pub struct DatabaseOutputs {
    pub cluster_arn: String,
    pub db_name: String,
    pub admin_secret: SecretRef,
    pub db_secret: SecretRef,
    pub security_group: SecurityGroupHandle,
}

pub struct DatabaseCluster;

impl DatabaseCluster {
    pub fn declare(cfg: &StackConfig, net: &NetworkOutputs) -> Result<DatabaseOutputs, DomainError> {
        // Fail-fast: referencias de secretos inválidas abortan el plan antes
        // de que exista nada que invocar.
        let admin_secret = SecretRef::new(&cfg.admin_secret_name)?;
        let db_secret = SecretRef::new(&cfg.db_secret_name)?;
        Ok(DatabaseOutputs {
            cluster_arn: format!("cluster:{}-db", cfg.stack_name),
            db_name: cfg.db_name.clone(),
            admin_secret,
            db_secret,
            security_group: net.database_sg.clone(),
        })
    }
}
