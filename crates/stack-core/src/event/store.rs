//! Almacenamiento de eventos append-only.
//!
//! El trait es deliberadamente mínimo: el engine sólo necesita agregar un
//! evento y listar los de un stack en orden de `seq`. La implementación en
//! memoria sirve a los tests y al binario de demo; la durable vive en el
//! crate de persistencia detrás del mismo seam.
use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{ConvergeEvent, ConvergeEventKind};

pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo
    /// (con `seq` y `ts` asignados).
    fn append_kind(&mut self, stack_id: Uuid, kind: ConvergeEventKind) -> ConvergeEvent;

    /// Lista eventos de un stack (orden ascendente por `seq`).
    fn list(&self, stack_id: Uuid) -> Vec<ConvergeEvent>;
}

/// Store en memoria: un log por `stack_id`.
#[derive(Default)]
pub struct InMemoryEventStore {
    logs: HashMap<Uuid, Vec<ConvergeEvent>>,
}

impl InMemoryEventStore {
    /// Cantidad de stacks con al menos un evento.
    pub fn stack_count(&self) -> usize {
        self.logs.len()
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, stack_id: Uuid, kind: ConvergeEventKind) -> ConvergeEvent {
        let log = self.logs.entry(stack_id).or_default();
        let ev = ConvergeEvent { seq: log.len() as u64,
                                 stack_id,
                                 kind,
                                 ts: Utc::now() };
        log.push(ev.clone());
        ev
    }

    fn list(&self, stack_id: Uuid) -> Vec<ConvergeEvent> {
        self.logs.get(&stack_id).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{EventStore, InMemoryEventStore};
    use crate::event::ConvergeEventKind;
    use uuid::Uuid;

    #[test]
    fn seq_is_per_stack_and_monotonic() {
        let mut store = InMemoryEventStore::default();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let e0 = store.append_kind(a, ConvergeEventKind::ResourceRemoved { logical_id: "x".to_string() });
        let e1 = store.append_kind(a, ConvergeEventKind::ResourceRemoved { logical_id: "y".to_string() });
        let other = store.append_kind(b, ConvergeEventKind::ResourceRemoved { logical_id: "z".to_string() });

        assert_eq!(e0.seq, 0);
        assert_eq!(e1.seq, 1);
        assert_eq!(other.seq, 0, "seq must be independent per stack");
        assert_eq!(store.list(a).len(), 2);
        assert_eq!(store.stack_count(), 2);
    }
}
