//! Frontera de acceso: separación deliberada entre la identidad que EJECUTA
//! el Action Target y la identidad que puede INVOCARLO.
//!
//! La identidad de ejecución recibe la política mínima para alcanzar sus
//! dependencias (almacén de credenciales, interfaces de red); la identidad
//! invocante recibe una política aparte, más estrecha, limitada a ese target
//! concreto y a ningún otro.
use serde::{Deserialize, Serialize};

use crate::network::NetworkPlacement;
use crate::policy::{AccessGrant, AccessPolicySet};
use crate::DomainError;

/// Política + ubicación de red de la identidad de ejecución del target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionBoundary {
    pub policy: AccessPolicySet,
    pub placement: NetworkPlacement,
}

impl ExecutionBoundary {
    pub fn new(policy: AccessPolicySet, placement: NetworkPlacement) -> Self {
        Self { policy, placement }
    }
}

/// Política de la identidad autorizada a invocar el target: un único grant
/// con scope en ese target y nada más.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokerPolicy {
    grant: AccessGrant,
}

impl InvokerPolicy {
    pub fn for_target(target_name: &str) -> Result<Self, DomainError> {
        let grant = AccessGrant::new(vec!["lambda:InvokeFunction".to_string()],
                                     vec![target_name.to_string()])?;
        Ok(Self { grant })
    }

    pub fn grant(&self) -> &AccessGrant {
        &self.grant
    }
}

#[cfg(test)]
mod tests {
    use super::InvokerPolicy;

    #[test]
    fn invoker_policy_is_scoped_to_one_target() {
        let p = InvokerPolicy::for_target("db-schema-init").expect("policy");
        assert_eq!(p.grant().resources(), ["db-schema-init".to_string()]);
        assert_eq!(p.grant().actions(), ["lambda:InvokeFunction".to_string()]);
    }
}
