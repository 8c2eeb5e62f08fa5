//! Declaración de la red del stack.
//!
//! Los nombres de recursos se derivan determinísticamente del nombre del
//! stack; el aprovisionamiento físico de la topología es un colaborador
//! externo (fuera de alcance), aquí sólo se declara el wiring.
use stack_domain::{DomainError, SecurityGroupHandle};

use crate::config::StackConfig;

/// Record de salida de la red: exactamente lo que los componentes
/// posteriores necesitan, pasado explícitamente (sin campos compartidos).
#[derive(Debug, Clone)]
pub struct NetworkOutputs {
    pub vpc_name: String,
    pub private_subnet_ids: Vec<String>,
    pub database_sg: SecurityGroupHandle,
    pub initializer_sg: SecurityGroupHandle,
    pub service_sg: SecurityGroupHandle,
}

pub struct Network;

impl Network {
    pub fn declare(cfg: &StackConfig) -> Result<NetworkOutputs, DomainError> {
        let stack = &cfg.stack_name;
        Ok(NetworkOutputs {
            vpc_name: format!("{stack}-vpc"),
            private_subnet_ids: vec![format!("{stack}-private-a"), format!("{stack}-private-b")],
            database_sg: SecurityGroupHandle::new(&format!("sg-{stack}-db"))?,
            initializer_sg: SecurityGroupHandle::new(&format!("sg-{stack}-db-init"))?,
            service_sg: SecurityGroupHandle::new(&format!("sg-{stack}-svc"))?,
        })
    }
}
