//! Dobles de prueba para el trait `ActionTarget`.
//!
//! Compartidos por los tests del core y de integración: contar invocaciones
//! es la forma directa de verificar la idempotencia del trigger.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::Value;

use stack_core::{ActionTarget, ConfigPayload, CoreError};

/// Target que cuenta sus invocaciones y responde un resultado fijo.
pub struct RecordingTarget {
    name: String,
    version: u32,
    result: Value,
    calls: Arc<AtomicUsize>,
}

impl RecordingTarget {
    pub fn new(name: &str, result: Value) -> Self {
        Self { name: name.to_string(),
               version: 1,
               result,
               calls: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Invocaciones observadas hasta el momento.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ActionTarget for RecordingTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn invoke(&self, _payload: &ConfigPayload) -> Result<Value, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.result.clone())
    }
}

/// Target que siempre falla con el mensaje dado.
pub struct FailingTarget {
    name: String,
    message: String,
}

impl FailingTarget {
    pub fn new(name: &str, message: &str) -> Self {
        Self { name: name.to_string(),
               message: message.to_string() }
    }
}

impl ActionTarget for FailingTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, _payload: &ConfigPayload) -> Result<Value, CoreError> {
        Err(CoreError::Invocation(self.message.clone()))
    }
}

/// Target que duerme antes de responder (para ejercitar la espera acotada).
pub struct SlowTarget {
    name: String,
    delay: Duration,
}

impl SlowTarget {
    pub fn new(name: &str, delay: Duration) -> Self {
        Self { name: name.to_string(), delay }
    }
}

impl ActionTarget for SlowTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, _payload: &ConfigPayload) -> Result<Value, CoreError> {
        thread::sleep(self.delay);
        Ok(Value::Null)
    }
}
