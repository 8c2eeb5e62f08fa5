//! Wiring del inicializador one-shot de la base.
//!
//! Junta las tres piezas del diseño:
//! - el Configuration Payload (fail-fast de referencias requeridas),
//! - la frontera de acceso (política mínima de ejecución + política de
//!   invocación con scope en este target y ningún otro),
//! - el Result Publisher, cuyo campo diferido consumirá el servicio.
use std::sync::Arc;
use std::time::Duration;

use stack_adapters::{db_init_payload, DbInitInputs, DbInitializerTarget};
use stack_core::{ActionTarget, ConfigPayload, InitializerSpec, ResultPublisher};
use stack_domain::{AccessGrant, AccessPolicySet, DomainError, ExecutionBoundary, IngressRule,
                   InvokerPolicy, NetworkPlacement};

use crate::config::StackConfig;
use crate::topology::database::DatabaseOutputs;
use crate::topology::network::NetworkOutputs;

/// Id lógico del inicializador dentro del stack.
pub const DB_INIT_LOGICAL_ID: &str = "db-init";

/// Puerto del cluster que el inicializador necesita alcanzar.
const DB_PORT: u16 = 5432;

/// Record de salida del wiring del inicializador.
pub struct InitializerWiring {
    pub logical_id: String,
    pub payload: ConfigPayload,
    pub target: Arc<dyn ActionTarget>,
    pub timeout: Duration,
    pub boundary: ExecutionBoundary,
    pub invoker: InvokerPolicy,
    pub db_ingress: IngressRule,
    pub publisher: ResultPublisher,
}

impl std::fmt::Debug for InitializerWiring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializerWiring")
         .field("logical_id", &self.logical_id)
         .field("payload", &self.payload)
         .field("target", &self.target.name())
         .field("timeout", &self.timeout)
         .field("boundary", &self.boundary)
         .field("invoker", &self.invoker)
         .field("db_ingress", &self.db_ingress)
         .field("publisher", &self.publisher)
         .finish()
    }
}

impl InitializerWiring {
    /// Entrada de plan para un pase de convergencia (reconstruible por pase).
    pub fn to_spec(&self) -> InitializerSpec {
        InitializerSpec::new(self.logical_id.clone(), self.payload.clone(), Arc::clone(&self.target))
            .with_timeout(self.timeout)
    }
}

pub struct DbInitializer;

impl DbInitializer {
    pub fn declare(cfg: &StackConfig,
                   net: &NetworkOutputs,
                   db: &DatabaseOutputs)
                   -> Result<InitializerWiring, DomainError> {
        let payload = db_init_payload(&DbInitInputs { creds_secret: &db.admin_secret,
                                                      db_secret: &db.db_secret,
                                                      db_cluster_arn: &db.cluster_arn,
                                                      db_name: &db.db_name })?;

        let target: Arc<dyn ActionTarget> = Arc::new(DbInitializerTarget::new());

        // Identidad de ejecución: línea base + exactamente lo que el target
        // necesita (leer ambos secretos, ejecutar contra el cluster).
        let policy = AccessPolicySet::baseline()
            .with_grant(AccessGrant::new(vec!["secretsmanager:GetSecretValue".to_string()],
                                         vec![db.admin_secret.name().to_string(),
                                              db.db_secret.name().to_string()])?)
            .with_grant(AccessGrant::new(vec!["rds-data:ExecuteStatement".to_string()],
                                         vec![db.cluster_arn.clone()])?);
        let placement = NetworkPlacement::new(net.private_subnet_ids.clone(), net.initializer_sg.clone())?;
        let boundary = ExecutionBoundary::new(policy, placement);

        // Identidad invocante: aparte y más estrecha, sólo este target.
        let invoker = InvokerPolicy::for_target(target.name())?;

        // La base permite tráfico desde el grupo del inicializador.
        let db_ingress = db.security_group.permit_from(&net.initializer_sg, DB_PORT);

        Ok(InitializerWiring { logical_id: DB_INIT_LOGICAL_ID.to_string(),
                               payload,
                               target,
                               timeout: Duration::from_millis(cfg.invoke_timeout_ms),
                               boundary,
                               invoker,
                               db_ingress,
                               publisher: ResultPublisher::for_resource(DB_INIT_LOGICAL_ID) })
    }
}
