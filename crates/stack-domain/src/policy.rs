//! Access Policy Set: la colección ordenada de permisos de la identidad de
//! ejecución del Action Target.
//!
//! Invariante: el conjunto es la unión de una línea base fija (escritura de
//! logs, attach/detach de interfaces de red) y los grants que aporta el
//! caller; nada más amplio por defecto. Los duplicados colapsan y el orden
//! de inserción se preserva.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Un permiso concreto: acciones sobre recursos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    actions: Vec<String>,
    resources: Vec<String>,
}

impl AccessGrant {
    pub fn new(actions: Vec<String>, resources: Vec<String>) -> Result<Self, DomainError> {
        if actions.is_empty() {
            return Err(DomainError::ValidationError("access grant requires at least one action".to_string()));
        }
        if resources.is_empty() {
            return Err(DomainError::ValidationError("access grant requires at least one resource".to_string()));
        }
        Ok(Self { actions, resources })
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    /// Clave estable del grant (para colapsar duplicados en el set).
    fn key(&self) -> String {
        format!("{}|{}", self.actions.join(","), self.resources.join(","))
    }
}

/// Unión ordenada de grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessPolicySet {
    grants: IndexMap<String, AccessGrant>,
}

impl AccessPolicySet {
    /// Línea base fija: lo mínimo que la identidad de ejecución necesita para
    /// correr (logs y manejo de interfaces de red), nada más.
    pub fn baseline() -> Self {
        let mut set = Self::default();
        // Estos grants son infalibles por construcción.
        let logs = AccessGrant { actions: vec!["logs:CreateLogGroup".to_string(),
                                               "logs:CreateLogStream".to_string(),
                                               "logs:PutLogEvents".to_string()],
                                 resources: vec!["*".to_string()] };
        let eni = AccessGrant { actions: vec!["ec2:CreateNetworkInterface".to_string(),
                                              "ec2:DescribeNetworkInterfaces".to_string(),
                                              "ec2:DeleteNetworkInterface".to_string()],
                                resources: vec!["*".to_string()] };
        set.insert(logs);
        set.insert(eni);
        set
    }

    fn insert(&mut self, grant: AccessGrant) {
        self.grants.entry(grant.key()).or_insert(grant);
    }

    /// Agrega un grant del caller preservando el orden; duplicados colapsan.
    pub fn with_grant(mut self, grant: AccessGrant) -> Self {
        self.insert(grant);
        self
    }

    pub fn grants(&self) -> impl Iterator<Item = &AccessGrant> {
        self.grants.values()
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessGrant, AccessPolicySet};

    fn grant(action: &str, resource: &str) -> AccessGrant {
        AccessGrant::new(vec![action.to_string()], vec![resource.to_string()]).expect("grant")
    }

    #[test]
    fn baseline_is_exactly_logs_and_network() {
        let base = AccessPolicySet::baseline();
        assert_eq!(base.len(), 2);
        let actions: Vec<&str> = base.grants().flat_map(|g| g.actions().iter().map(|a| a.as_str())).collect();
        assert!(actions.iter().any(|a| a.starts_with("logs:")));
        assert!(actions.iter().any(|a| a.starts_with("ec2:")));
    }

    #[test]
    fn union_preserves_order_and_collapses_duplicates() {
        let set = AccessPolicySet::baseline()
            .with_grant(grant("secretsmanager:GetSecretValue", "db-admin"))
            .with_grant(grant("rds-data:ExecuteStatement", "cluster-a"))
            .with_grant(grant("secretsmanager:GetSecretValue", "db-admin"));
        assert_eq!(set.len(), 4, "duplicate grant must collapse");
        let last = set.grants().last().expect("grants");
        assert_eq!(last.actions()[0], "rds-data:ExecuteStatement", "insertion order preserved");
    }

    #[test]
    fn empty_actions_or_resources_rejected() {
        assert!(AccessGrant::new(vec![], vec!["r".to_string()]).is_err());
        assert!(AccessGrant::new(vec!["a".to_string()], vec![]).is_err());
    }
}
