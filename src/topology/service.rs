//! Declaración del servicio de contenedores que consume el resultado del
//! inicializador.
use stack_core::DeferredField;
use stack_domain::SecurityGroupHandle;

use crate::config::StackConfig;
use crate::topology::network::NetworkOutputs;

/// Record declarativo del servicio. El secreto de aplicación llega como
/// valor diferido: sólo resoluble tras una convergencia exitosa del
/// inicializador.
#[derive(Debug, Clone)]
pub struct ServiceSpec {
    pub name: String,
    pub security_group: SecurityGroupHandle,
    pub container_port: u16,
    pub app_secret: DeferredField,
}

pub struct Service;

impl Service {
    pub fn declare(cfg: &StackConfig, net: &NetworkOutputs, app_secret: DeferredField) -> ServiceSpec {
        ServiceSpec { name: format!("{}-svc", cfg.stack_name),
                      security_group: net.service_sg.clone(),
                      container_port: 8080,
                      app_secret }
    }
}
