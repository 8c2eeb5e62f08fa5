//! Ubicación de red y handles de aislamiento.
//!
//! Estas estructuras son declarativas: describen dónde corre el Action
//! Target y qué tráfico se permite entre él y sus dependencias. El
//! aprovisionamiento real de la topología queda fuera de alcance.
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Handle de un security group. Es el objeto que el resto del sistema usa
/// para permitir tráfico entre el target y sus dependencias (p. ej. la base
/// de datos que inicializa).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityGroupHandle {
    id: String,
}

impl SecurityGroupHandle {
    pub fn new(id: &str) -> Result<Self, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::ValidationError("security group id must not be empty".to_string()));
        }
        Ok(Self { id: id.trim().to_string() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declara una regla de ingreso desde otro grupo hacia este, en un
    /// puerto concreto.
    pub fn permit_from(&self, source: &SecurityGroupHandle, port: u16) -> IngressRule {
        IngressRule { from: source.clone(),
                      to: self.clone(),
                      port }
    }
}

/// Regla declarada de tráfico permitido entre dos grupos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressRule {
    pub from: SecurityGroupHandle,
    pub to: SecurityGroupHandle,
    pub port: u16,
}

/// Ubicación de red del Action Target: subredes donde ejecuta y el grupo
/// que limita su alcance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkPlacement {
    pub subnet_ids: Vec<String>,
    pub security_group: SecurityGroupHandle,
}

impl NetworkPlacement {
    pub fn new(subnet_ids: Vec<String>, security_group: SecurityGroupHandle) -> Result<Self, DomainError> {
        if subnet_ids.is_empty() {
            return Err(DomainError::ValidationError("network placement requires at least one subnet".to_string()));
        }
        Ok(Self { subnet_ids, security_group })
    }
}

#[cfg(test)]
mod tests {
    use super::{NetworkPlacement, SecurityGroupHandle};

    #[test]
    fn permit_from_declares_a_directed_rule() {
        let db = SecurityGroupHandle::new("sg-db").expect("sg");
        let init = SecurityGroupHandle::new("sg-init").expect("sg");
        let rule = db.permit_from(&init, 5432);
        assert_eq!(rule.from, init);
        assert_eq!(rule.to, db);
        assert_eq!(rule.port, 5432);
    }

    #[test]
    fn placement_requires_subnets() {
        let sg = SecurityGroupHandle::new("sg-init").expect("sg");
        assert!(NetworkPlacement::new(vec![], sg).is_err());
    }
}
