//! EventStore durable sobre archivos JSON Lines.
//!
//! Un archivo append-only por `stack_id` bajo el directorio de estado. El
//! `seq` se rehidrata al abrir contando los eventos ya persistidos, de modo
//! que la identidad física y los resultados sobreviven reinicios del proceso
//! (un redeploy con configuración idéntica no re-invoca nada).
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::debug;
use uuid::Uuid;

use stack_core::event::{ConvergeEvent, ConvergeEventKind, EventStore};

use crate::config::StateConfig;
use crate::error::PersistenceError;

pub struct JsonlEventStore {
    dir: PathBuf,
    // Próximo seq por stack, rehidratado bajo demanda.
    seq_cache: HashMap<Uuid, u64>,
}

impl JsonlEventStore {
    /// Abre (creando si es necesario) el directorio de estado.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self { dir: dir.as_ref().to_path_buf(),
                  seq_cache: HashMap::new() })
    }

    /// Abre el store en el directorio configurado por entorno.
    pub fn from_env() -> Result<Self, PersistenceError> {
        Self::open(StateConfig::from_env().state_dir)
    }

    fn path_for(&self, stack_id: Uuid) -> PathBuf {
        self.dir.join(format!("{stack_id}.jsonl"))
    }

    /// Lista los stacks con estado persistido.
    pub fn known_stacks(&self) -> Result<Vec<Uuid>, PersistenceError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".jsonl") {
                if let Ok(id) = Uuid::parse_str(stem) {
                    ids.push(id);
                }
            }
        }
        ids.sort();
        Ok(ids)
    }

    pub fn try_list(&self, stack_id: Uuid) -> Result<Vec<ConvergeEvent>, PersistenceError> {
        let path = self.path_for(stack_id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(&path)?;
        let mut events = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let ev: ConvergeEvent = serde_json::from_str(&line)?;
            events.push(ev);
        }
        Ok(events)
    }

    fn next_seq(&mut self, stack_id: Uuid) -> Result<u64, PersistenceError> {
        if let Some(seq) = self.seq_cache.get(&stack_id) {
            return Ok(*seq);
        }
        let count = self.try_list(stack_id)?.len() as u64;
        debug!("rehydrated seq={} for stack {}", count, stack_id);
        self.seq_cache.insert(stack_id, count);
        Ok(count)
    }

    pub fn try_append(&mut self, stack_id: Uuid, kind: ConvergeEventKind) -> Result<ConvergeEvent, PersistenceError> {
        let seq = self.next_seq(stack_id)?;
        let ev = ConvergeEvent { seq,
                                 stack_id,
                                 kind,
                                 ts: Utc::now() };
        let line = serde_json::to_string(&ev)?;
        let mut file = OpenOptions::new().create(true)
                                         .append(true)
                                         .open(self.path_for(stack_id))?;
        writeln!(file, "{line}")?;
        self.seq_cache.insert(stack_id, seq + 1);
        Ok(ev)
    }
}

impl EventStore for JsonlEventStore {
    // El trait del core es infalible; un error de IO en el log de estado es
    // fatal para la operación de despliegue completa.
    fn append_kind(&mut self, stack_id: Uuid, kind: ConvergeEventKind) -> ConvergeEvent {
        self.try_append(stack_id, kind)
            .unwrap_or_else(|e| panic!("append to state log: {e}"))
    }

    fn list(&self, stack_id: Uuid) -> Vec<ConvergeEvent> {
        self.try_list(stack_id)
            .unwrap_or_else(|e| panic!("read state log: {e}"))
    }
}
