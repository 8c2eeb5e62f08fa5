//! Tipos del ledger: estado reconstruido (`StackInstance`) por replay de
//! eventos.
//!
//! El ledger aplica un replay lineal: consume eventos en orden y actualiza un
//! `ResourceRecord` por evento. La identidad física y el resultado vigentes
//! de un recurso provienen siempre del último `InvocationApplied`; un
//! `InvocationFailed` posterior cambia el estado pero no "inventa" una
//! identidad nueva (ésta sólo se registra en éxito).
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::event::{ConvergeEvent, ConvergeEventKind};
use crate::model::{Fingerprint, PhysicalId};
use crate::trigger::TriggerState;

/// Estado reconstruido de un stack completo.
pub struct StackInstance {
    pub id: Uuid,
    pub resources: Vec<ResourceRecord>,
    /// Pases completados con éxito.
    pub passes: u64,
    pub last_pass_fingerprint: Option<String>,
}

impl StackInstance {
    pub fn record(&self, logical_id: &str) -> Option<&ResourceRecord> {
        self.resources.iter().find(|r| r.logical_id == logical_id)
    }
}

/// Estado de un recurso lógico en la instancia.
pub struct ResourceRecord {
    pub logical_id: String,
    pub state: TriggerState,
    /// Identidad física registrada (del último Applied). `None` si nunca se
    /// aplicó con éxito.
    pub physical_id: Option<PhysicalId>,
    pub fingerprint: Option<Fingerprint>,
    /// Invocation Result vigente; se reemplaza cuando cambia la identidad
    /// física y se conserva tal cual durante los skips.
    pub result: Option<serde_json::Value>,
    pub attempts: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub applied_at: Option<DateTime<Utc>>,
}

impl ResourceRecord {
    fn new(logical_id: &str) -> Self {
        Self { logical_id: logical_id.to_string(),
               state: TriggerState::Absent,
               physical_id: None,
               fingerprint: None,
               result: None,
               attempts: 0,
               started_at: None,
               applied_at: None }
    }
}

/// Trait para reconstruir (`replay`) el estado de un stack a partir de
/// eventos.
pub trait StackLedger {
    fn load(&self, stack_id: Uuid, events: &[ConvergeEvent]) -> StackInstance;
}

pub struct InMemoryStackLedger;

impl InMemoryStackLedger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InMemoryStackLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl StackLedger for InMemoryStackLedger {
    fn load(&self, stack_id: Uuid, events: &[ConvergeEvent]) -> StackInstance {
        let mut resources: Vec<ResourceRecord> = Vec::new();
        let mut passes: u64 = 0;
        let mut last_pass_fingerprint: Option<String> = None;

        fn slot<'a>(resources: &'a mut Vec<ResourceRecord>, logical_id: &str) -> &'a mut ResourceRecord {
            if let Some(pos) = resources.iter().position(|r| r.logical_id == logical_id) {
                &mut resources[pos]
            } else {
                resources.push(ResourceRecord::new(logical_id));
                resources.last_mut().unwrap()
            }
        }

        for ev in events {
            match &ev.kind {
                ConvergeEventKind::StackInitialized { .. } => {}
                ConvergeEventKind::InvocationStarted { logical_id, .. } => {
                    let r = slot(&mut resources, logical_id);
                    r.state = TriggerState::Pending;
                    r.started_at = Some(ev.ts);
                    r.attempts += 1;
                }
                ConvergeEventKind::InvocationApplied { logical_id,
                                                      physical_id,
                                                      fingerprint,
                                                      result } => {
                    let r = slot(&mut resources, logical_id);
                    r.state = TriggerState::Applied;
                    r.physical_id = Some(physical_id.clone());
                    r.fingerprint = Some(fingerprint.clone());
                    r.result = Some(result.clone());
                    r.applied_at = Some(ev.ts);
                }
                ConvergeEventKind::InvocationSkipped { logical_id, .. } => {
                    // Identidad sin cambios: el estado Applied y el resultado
                    // vigente se conservan tal cual.
                    let r = slot(&mut resources, logical_id);
                    debug_assert!(matches!(r.state, TriggerState::Applied),
                                  "skip without prior applied state");
                }
                ConvergeEventKind::InvocationFailed { logical_id, .. } => {
                    let r = slot(&mut resources, logical_id);
                    r.state = TriggerState::Failed;
                }
                ConvergeEventKind::ResourceRemoved { logical_id } => {
                    let r = slot(&mut resources, logical_id);
                    r.state = TriggerState::Removed;
                }
                ConvergeEventKind::PassCompleted { pass_fingerprint } => {
                    passes += 1;
                    last_pass_fingerprint = Some(pass_fingerprint.clone());
                }
            }
        }

        StackInstance { id: stack_id,
                        resources,
                        passes,
                        last_pass_fingerprint }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::{InMemoryStackLedger, StackLedger};
    use crate::errors::CoreError;
    use crate::event::{ConvergeEvent, ConvergeEventKind};
    use crate::model::{ConfigPayload, Fingerprint, PhysicalId};
    use crate::trigger::TriggerState;

    fn events_from(stack_id: Uuid, kinds: Vec<ConvergeEventKind>) -> Vec<ConvergeEvent> {
        kinds.into_iter()
             .enumerate()
             .map(|(seq, kind)| ConvergeEvent { seq: seq as u64,
                                                stack_id,
                                                kind,
                                                ts: Utc::now() })
             .collect()
    }

    #[test]
    fn replay_counts_attempts_and_keeps_last_applied() {
        let stack_id = Uuid::new_v4();
        let fp1 = Fingerprint::of(&ConfigPayload::new().with("dbSecretName", "b"));
        let fp2 = Fingerprint::of(&ConfigPayload::new().with("dbSecretName", "c"));
        let pid1 = PhysicalId::new("db-init", 1, &fp1);
        let pid2 = PhysicalId::new("db-init", 1, &fp2);

        // Intento fallido, reintento exitoso, cambio de config y nuevo Applied
        let events = events_from(stack_id, vec![
            ConvergeEventKind::StackInitialized { plan_hash: "h".to_string(), resource_count: 1 },
            ConvergeEventKind::InvocationStarted { logical_id: "db-init".to_string(),
                                                   physical_id: pid1.clone(),
                                                   fingerprint: fp1.clone() },
            ConvergeEventKind::InvocationFailed { logical_id: "db-init".to_string(),
                                                  physical_id: pid1.clone(),
                                                  error: CoreError::Invocation("boom".to_string()) },
            ConvergeEventKind::InvocationStarted { logical_id: "db-init".to_string(),
                                                   physical_id: pid1.clone(),
                                                   fingerprint: fp1.clone() },
            ConvergeEventKind::InvocationApplied { logical_id: "db-init".to_string(),
                                                   physical_id: pid1.clone(),
                                                   fingerprint: fp1.clone(),
                                                   result: json!({"v": 1}) },
            ConvergeEventKind::PassCompleted { pass_fingerprint: "p1".to_string() },
            ConvergeEventKind::InvocationStarted { logical_id: "db-init".to_string(),
                                                   physical_id: pid2.clone(),
                                                   fingerprint: fp2.clone() },
            ConvergeEventKind::InvocationApplied { logical_id: "db-init".to_string(),
                                                   physical_id: pid2.clone(),
                                                   fingerprint: fp2.clone(),
                                                   result: json!({"v": 2}) },
            ConvergeEventKind::PassCompleted { pass_fingerprint: "p2".to_string() },
        ]);

        let instance = InMemoryStackLedger::new().load(stack_id, &events);
        assert_eq!(instance.id, stack_id);
        assert_eq!(instance.passes, 2);
        assert_eq!(instance.last_pass_fingerprint.as_deref(), Some("p2"));

        let r = instance.record("db-init").expect("record");
        assert_eq!(r.attempts, 3, "every InvocationStarted counts as an attempt");
        assert_eq!(r.state, TriggerState::Applied);
        // Last-write-wins: identidad, fingerprint y resultado del último Applied
        assert_eq!(r.physical_id.as_ref(), Some(&pid2));
        assert_eq!(r.fingerprint.as_ref(), Some(&fp2));
        assert_eq!(r.result, Some(json!({"v": 2})));
        assert!(r.started_at.is_some());
        assert!(r.applied_at.is_some());
    }

    #[test]
    fn failure_keeps_the_previous_applied_identity() {
        let stack_id = Uuid::new_v4();
        let fp = Fingerprint::of(&ConfigPayload::new().with("dbSecretName", "b"));
        let pid = PhysicalId::new("db-init", 1, &fp);

        let events = events_from(stack_id, vec![
            ConvergeEventKind::InvocationStarted { logical_id: "db-init".to_string(),
                                                   physical_id: pid.clone(),
                                                   fingerprint: fp.clone() },
            ConvergeEventKind::InvocationApplied { logical_id: "db-init".to_string(),
                                                   physical_id: pid.clone(),
                                                   fingerprint: fp.clone(),
                                                   result: json!({"ok": true}) },
            ConvergeEventKind::InvocationStarted { logical_id: "db-init".to_string(),
                                                   physical_id: pid.clone(),
                                                   fingerprint: fp.clone() },
            ConvergeEventKind::InvocationFailed { logical_id: "db-init".to_string(),
                                                  physical_id: pid.clone(),
                                                  error: CoreError::Timeout { timeout_ms: 10 } },
        ]);

        let r = InMemoryStackLedger::new().load(stack_id, &events);
        let record = r.record("db-init").expect("record");
        assert_eq!(record.state, TriggerState::Failed);
        assert_eq!(record.attempts, 2);
        // El fallo cambia el estado pero no borra la identidad previa
        assert_eq!(record.physical_id.as_ref(), Some(&pid));
        assert_eq!(record.result, Some(json!({"ok": true})));
    }
}
