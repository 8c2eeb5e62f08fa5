//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable
//! (`CONFIG`). Todos los parámetros tienen default: la ausencia de una
//! variable nunca aborta; los errores de configuración reales (referencias
//! de secretos inválidas) se detectan al armar la topología.
use once_cell::sync::Lazy;
use std::env;

/// Configuración global del stack (extensible para más secciones).
#[derive(Debug, Clone)]
pub struct StackConfig {
    /// Nombre lógico del stack; prefija los nombres derivados de recursos.
    pub stack_name: String,
    /// Nombre de la base de datos a inicializar.
    pub db_name: String,
    /// Secreto con credenciales administrativas del cluster.
    pub admin_secret_name: String,
    /// Secreto con los datos de conexión de la base.
    pub db_secret_name: String,
    /// Espera acotada para la invocación del inicializador, en ms.
    pub invoke_timeout_ms: u64,
}

impl StackConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let stack_name = env::var("STACKFLOW_STACK_NAME").unwrap_or_else(|_| "stackflow".to_string());
        let db_name = env::var("STACKFLOW_DB_NAME").unwrap_or_else(|_| "appdb".to_string());
        let admin_secret_name =
            env::var("STACKFLOW_ADMIN_SECRET").unwrap_or_else(|_| format!("{stack_name}-db-admin"));
        let db_secret_name =
            env::var("STACKFLOW_DB_SECRET").unwrap_or_else(|_| format!("{stack_name}-db-conn"));
        let invoke_timeout_ms = env::var("STACKFLOW_INVOKE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(stack_core::constants::DEFAULT_INVOKE_TIMEOUT_MS);
        Self { stack_name,
               db_name,
               admin_secret_name,
               db_secret_name,
               invoke_timeout_ms }
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<StackConfig> = Lazy::new(StackConfig::from_env);
