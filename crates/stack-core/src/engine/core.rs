//! Core ConvergenceEngine implementation
//!
//! Motor de convergencia declarativa.
//!
//! Responsable de decidir, en cada pase, qué Action Targets invocar a partir
//! de la comparación identidad candidata vs. identidad registrada, de
//! serializar esas invocaciones por recurso y de mantener el log de eventos
//! que hace reproducible la decisión.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use serde_json::json;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::event::{ConvergeEvent, ConvergeEventKind, EventStore};
use crate::hashing::hash_value;
use crate::ledger::{StackInstance, StackLedger};
use crate::model::{ConfigPayload, Fingerprint, PhysicalId};
use crate::publisher::DeferredField;
use crate::trigger::{ActionTarget, TriggerState};

use super::plan::StackPlan;

/// Resultado por recurso de un pase de convergencia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceOutcome {
    /// El target fue invocado y aplicó una identidad nueva.
    Invoked,
    /// Identidad sin cambios: no hubo invocación.
    Skipped,
    /// El recurso salió del plan (sin acción compensatoria).
    Removed,
}

#[derive(Debug, Clone)]
pub struct PassOutcome {
    pub logical_id: String,
    pub physical_id: Option<PhysicalId>,
    pub outcome: ResourceOutcome,
}

/// Reporte de un pase exitoso.
#[derive(Debug, Clone)]
pub struct PassReport {
    pub stack_id: Uuid,
    pub outcomes: Vec<PassOutcome>,
    pub pass_fingerprint: String,
}

impl PassReport {
    pub fn invocations(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome == ResourceOutcome::Invoked).count()
    }
}

/// Motor de convergencia.
pub struct ConvergenceEngine<E, L>
    where E: EventStore,
          L: StackLedger
{
    event_store: E,
    ledger: L,
    default_stack_id: Option<Uuid>,
}

impl ConvergenceEngine<crate::event::InMemoryEventStore, crate::ledger::InMemoryStackLedger> {
    /// Crea un engine con stores en memoria.
    pub fn new() -> Self {
        Self::new_with_stores(crate::event::InMemoryEventStore::default(),
                              crate::ledger::InMemoryStackLedger::new())
    }
}

impl Default for ConvergenceEngine<crate::event::InMemoryEventStore, crate::ledger::InMemoryStackLedger> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, L> ConvergenceEngine<E, L>
    where E: EventStore,
          L: StackLedger
{
    /// Crea un motor con los stores proporcionados.
    pub fn new_with_stores(event_store: E, ledger: L) -> Self {
        Self { event_store,
               ledger,
               default_stack_id: None }
    }

    /// Define/genera un `stack_id` por defecto si no existe aún y lo retorna.
    pub fn ensure_default_stack_id(&mut self) -> Uuid {
        *self.default_stack_id.get_or_insert_with(Uuid::new_v4)
    }

    /// Fija explícitamente un `stack_id` por defecto.
    pub fn set_default_stack_id(&mut self, stack_id: Uuid) {
        self.default_stack_id = Some(stack_id);
    }

    /// Obtiene el `stack_id` por defecto si está configurado.
    pub fn default_stack_id(&self) -> Option<Uuid> {
        self.default_stack_id
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    /// Lista eventos de un stack concreto.
    pub fn events_for(&self, stack_id: Uuid) -> Vec<ConvergeEvent> {
        self.event_store.list(stack_id)
    }

    /// Lista eventos del stack por defecto.
    pub fn events(&self) -> Option<Vec<ConvergeEvent>> {
        self.default_stack_id.map(|sid| self.event_store.list(sid))
    }

    /// Estado reconstruido (replay) del stack por defecto.
    pub fn instance(&self) -> Option<StackInstance> {
        self.default_stack_id
            .map(|sid| self.ledger.load(sid, &self.event_store.list(sid)))
    }

    /// Ensure a StackInitialized event exists and return the current events
    /// for the stack (including the possibly newly appended one).
    fn load_or_init(&mut self, stack_id: Uuid, plan: &StackPlan) -> Vec<ConvergeEvent> {
        let mut events = self.event_store.list(stack_id);
        let has_init = events.iter().any(|e| matches!(e.kind, ConvergeEventKind::StackInitialized { .. }));
        if !has_init {
            let ev = self.event_store
                         .append_kind(stack_id,
                                      ConvergeEventKind::StackInitialized { plan_hash: plan.plan_hash.clone(),
                                                                            resource_count: plan.len() });
            events.push(ev);
        }
        self.default_stack_id = Some(stack_id);
        events
    }

    /// Ejecuta un pase de convergencia sobre el stack por defecto.
    pub fn converge(&mut self, plan: &StackPlan) -> Result<PassReport, CoreError> {
        let stack_id = self.ensure_default_stack_id();
        self.converge_stack(stack_id, plan)
    }

    /// Ejecuta un pase de convergencia: compara identidades candidatas con
    /// las registradas, invoca los targets que cambiaron, registra removals
    /// y cierra el pase con su fingerprint agregado.
    ///
    /// Stop-on-failure: el primer recurso en Failed aborta el pase y propaga
    /// el error al caller (la operación de despliegue completa falla).
    pub fn converge_stack(&mut self, stack_id: Uuid, plan: &StackPlan) -> Result<PassReport, CoreError> {
        let events = self.load_or_init(stack_id, plan);
        let instance = self.ledger.load(stack_id, &events);

        let mut outcomes: Vec<PassOutcome> = Vec::with_capacity(plan.len());

        for spec in &plan.resources {
            let fingerprint = Fingerprint::of(&spec.payload);
            let candidate = PhysicalId::new(&spec.logical_id, spec.target.version(), &fingerprint);

            // La identidad registrada proviene únicamente del último Applied:
            // tras un fallo, el siguiente pase vuelve a intentar aunque la
            // configuración no haya cambiado.
            let recorded = instance.record(&spec.logical_id)
                                   .filter(|r| r.state == TriggerState::Applied)
                                   .and_then(|r| r.physical_id.clone());

            if recorded.as_ref() == Some(&candidate) {
                debug!("skip '{}': identity unchanged ({})", spec.logical_id, candidate);
                let _ = self.event_store
                            .append_kind(stack_id,
                                         ConvergeEventKind::InvocationSkipped { logical_id: spec.logical_id.clone(),
                                                                                physical_id: candidate.clone() });
                outcomes.push(PassOutcome { logical_id: spec.logical_id.clone(),
                                            physical_id: Some(candidate),
                                            outcome: ResourceOutcome::Skipped });
                continue;
            }

            info!("invoke '{}' as {} (target v{})",
                  spec.logical_id,
                  candidate,
                  spec.target.version());
            let _ = self.event_store
                        .append_kind(stack_id,
                                     ConvergeEventKind::InvocationStarted { logical_id: spec.logical_id.clone(),
                                                                            physical_id: candidate.clone(),
                                                                            fingerprint: fingerprint.clone() });

            match invoke_with_timeout(Arc::clone(&spec.target), spec.payload.clone(), spec.timeout) {
                Ok(result) => {
                    let _ = self.event_store
                                .append_kind(stack_id,
                                             ConvergeEventKind::InvocationApplied { logical_id: spec.logical_id.clone(),
                                                                                    physical_id: candidate.clone(),
                                                                                    fingerprint: fingerprint.clone(),
                                                                                    result });
                    outcomes.push(PassOutcome { logical_id: spec.logical_id.clone(),
                                                physical_id: Some(candidate),
                                                outcome: ResourceOutcome::Invoked });
                }
                Err(error) => {
                    warn!("invocation of '{}' failed: {}", spec.logical_id, error);
                    let _ = self.event_store
                                .append_kind(stack_id,
                                             ConvergeEventKind::InvocationFailed { logical_id: spec.logical_id.clone(),
                                                                                   physical_id: candidate,
                                                                                   error: error.clone() });
                    return Err(error);
                }
            }
        }

        // Recursos registrados que salieron del plan: se marcan Removed sin
        // invocar nada (el sistema sólo reacciona a create/update).
        for record in &instance.resources {
            let in_plan = plan.resources.iter().any(|s| s.logical_id == record.logical_id);
            if !in_plan && record.state != TriggerState::Removed {
                info!("resource '{}' left the plan; no teardown invocation", record.logical_id);
                let _ = self.event_store
                            .append_kind(stack_id,
                                         ConvergeEventKind::ResourceRemoved { logical_id: record.logical_id.clone() });
                outcomes.push(PassOutcome { logical_id: record.logical_id.clone(),
                                            physical_id: record.physical_id.clone(),
                                            outcome: ResourceOutcome::Removed });
            }
        }

        let pass_fingerprint = self.complete_pass(stack_id, plan, &outcomes);

        Ok(PassReport { stack_id,
                        outcomes,
                        pass_fingerprint })
    }

    fn complete_pass(&mut self, stack_id: Uuid, plan: &StackPlan, outcomes: &[PassOutcome]) -> String {
        let ids: Vec<String> = outcomes.iter()
                                       .filter(|o| o.outcome != ResourceOutcome::Removed)
                                       .filter_map(|o| o.physical_id.as_ref().map(|p| p.to_string()))
                                       .collect();
        let pass_fingerprint = hash_value(&json!({
                                              "engine_version": crate::constants::ENGINE_VERSION,
                                              "plan_hash": plan.plan_hash,
                                              "physical_ids": ids,
                                          }));
        let _ = self.event_store
                    .append_kind(stack_id,
                                 ConvergeEventKind::PassCompleted { pass_fingerprint: pass_fingerprint.clone() });
        pass_fingerprint
    }

    /// Resuelve un valor diferido publicado por el Result Publisher.
    ///
    /// Sólo entrega un valor si el trigger del recurso está en Applied; en
    /// Failed (o sin invocación registrada) falla ruidosamente en lugar de
    /// devolver un valor viejo o parcial.
    pub fn resolve(&self, deferred: &DeferredField) -> Result<serde_json::Value, CoreError> {
        let stack_id = self.default_stack_id
                           .ok_or_else(|| CoreError::Internal("no stack converged yet".into()))?;
        self.resolve_for(stack_id, deferred)
    }

    /// Variante de `resolve` para un stack explícito.
    pub fn resolve_for(&self, stack_id: Uuid, deferred: &DeferredField) -> Result<serde_json::Value, CoreError> {
        let events = self.event_store.list(stack_id);
        let instance = self.ledger.load(stack_id, &events);
        let record = instance.record(&deferred.logical_id)
                             .ok_or_else(|| CoreError::UnknownResource(deferred.logical_id.clone()))?;

        if record.state != TriggerState::Applied {
            return Err(CoreError::ResultUnavailable { logical_id: deferred.logical_id.clone(),
                                                      state: record.state.to_string() });
        }

        record.result
              .as_ref()
              .and_then(|r| r.get(&deferred.field))
              .cloned()
              .ok_or_else(|| CoreError::ResultFieldMissing { logical_id: deferred.logical_id.clone(),
                                                             field: deferred.field.clone() })
    }

    /// Variante compacta de eventos del stack por defecto (debug/trazas).
    pub fn event_variants(&self) -> Option<Vec<&'static str>> {
        self.events().map(|events| {
                         events.iter()
                               .map(|e| match e.kind {
                                   ConvergeEventKind::StackInitialized { .. } => "I",
                                   ConvergeEventKind::InvocationStarted { .. } => "S",
                                   ConvergeEventKind::InvocationApplied { .. } => "A",
                                   ConvergeEventKind::InvocationSkipped { .. } => "K",
                                   ConvergeEventKind::InvocationFailed { .. } => "X",
                                   ConvergeEventKind::ResourceRemoved { .. } => "R",
                                   ConvergeEventKind::PassCompleted { .. } => "C",
                               })
                               .collect()
                     })
    }
}

/// Invoca el target con espera acotada.
///
/// La invocación corre en un worker; superado el timeout se reporta
/// `CoreError::Timeout` y el worker queda corriendo hasta terminar (no hay
/// cancelación a mitad de invocación: una vez Pending, la operación llega a
/// su fin o al timeout).
fn invoke_with_timeout(target: Arc<dyn ActionTarget>,
                       payload: ConfigPayload,
                       timeout: Duration)
                       -> Result<serde_json::Value, CoreError> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(target.invoke(&payload));
    });
    match rx.recv_timeout(timeout) {
        Ok(res) => res,
        Err(_) => Err(CoreError::Timeout { timeout_ms: timeout.as_millis() as u64 }),
    }
}
