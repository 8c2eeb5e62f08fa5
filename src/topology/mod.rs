//! Ensamblado de la topología del stack.
//!
//! Cada componente recibe explícitamente los outputs del anterior y devuelve
//! su propio record de salida; no hay estado mutable compartido entre pasos
//! de construcción.
pub mod database;
pub mod initializer;
pub mod network;
pub mod service;

use stack_core::{build_stack_plan, StackPlan};
use stack_domain::DomainError;

use crate::config::StackConfig;

pub use database::{DatabaseCluster, DatabaseOutputs};
pub use initializer::{DbInitializer, InitializerWiring, DB_INIT_LOGICAL_ID};
pub use network::{Network, NetworkOutputs};
pub use service::{Service, ServiceSpec};

/// Topología completa declarada: red → base → inicializador → servicio.
#[derive(Debug)]
pub struct StackTopology {
    pub network: NetworkOutputs,
    pub database: DatabaseOutputs,
    pub initializer: InitializerWiring,
    pub service: ServiceSpec,
}

impl StackTopology {
    pub fn assemble(cfg: &StackConfig) -> Result<Self, DomainError> {
        let network = Network::declare(cfg)?;
        let database = DatabaseCluster::declare(cfg, &network)?;
        let initializer = DbInitializer::declare(cfg, &network, &database)?;
        let service = Service::declare(cfg, &network, initializer.publisher.field("appSecretName"));
        Ok(Self { network,
                  database,
                  initializer,
                  service })
    }

    /// Plan de convergencia del pase actual (reconstruido en cada pase).
    pub fn plan(&self) -> StackPlan {
        build_stack_plan(vec![self.initializer.to_spec()])
    }
}
