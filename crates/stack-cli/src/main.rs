use stack_core::{ConvergeEventKind, ConvergenceEngine, InMemoryStackLedger, ResultPublisher};
use stack_persistence::JsonlEventStore;
use stackflow_rust::config::StackConfig;
use stackflow_rust::topology::{StackTopology, DB_INIT_LOGICAL_ID};
use uuid::Uuid;

fn open_engine() -> ConvergenceEngine<JsonlEventStore, InMemoryStackLedger> {
    let store = match JsonlEventStore::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[stack] state dir error: {e}");
            std::process::exit(5);
        }
    };
    ConvergenceEngine::new_with_stores(store, InMemoryStackLedger::new())
}

fn main() {
    // Cargar .env si existe para STACKFLOW_*
    let _ = dotenvy::dotenv();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
        std::process::exit(2);
    }

    match args[1].as_str() {
        // `stack converge [--stack <UUID>]`
        "converge" => {
            let stack = parse_flag(&args, "--stack").map(|s| parse_uuid(&s));
            let cfg = StackConfig::from_env();
            let topology = match StackTopology::assemble(&cfg) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("[stack converge] configuration error: {e}");
                    std::process::exit(4);
                }
            };

            let mut engine = open_engine();
            let stack_id = stack.unwrap_or_else(Uuid::new_v4);
            engine.set_default_stack_id(stack_id);

            match engine.converge(&topology.plan()) {
                Ok(report) => {
                    println!("stack: {stack_id}");
                    for o in &report.outcomes {
                        match &o.physical_id {
                            Some(pid) => println!("  {:?} {} -> {}", o.outcome, o.logical_id, pid),
                            None => println!("  {:?} {}", o.outcome, o.logical_id),
                        }
                    }
                    println!("pass fingerprint: {}", report.pass_fingerprint);
                }
                Err(e) => {
                    eprintln!("[stack converge] pass failed: {e}");
                    std::process::exit(5);
                }
            }
        }
        // `stack events --stack <UUID>`
        "events" => {
            let stack_id = require_stack(&args);
            let engine = open_engine();
            let events = engine.events_for(stack_id);
            if events.is_empty() {
                eprintln!("[stack events] stack no encontrado: {stack_id}");
                std::process::exit(4);
            }
            for ev in events {
                println!("{:>4} {}", ev.seq, describe(&ev.kind));
            }
        }
        // `stack resolve --stack <UUID> [--field <NAME>]`
        "resolve" => {
            let stack_id = require_stack(&args);
            let field = parse_flag(&args, "--field").unwrap_or_else(|| "appSecretName".to_string());
            let engine = open_engine();
            let deferred = ResultPublisher::for_resource(DB_INIT_LOGICAL_ID).field(&field);
            match engine.resolve_for(stack_id, &deferred) {
                Ok(value) => println!("{value}"),
                Err(e) => {
                    eprintln!("[stack resolve] {e}");
                    std::process::exit(4);
                }
            }
        }
        _ => {
            usage();
            std::process::exit(2);
        }
    }
}

fn usage() {
    eprintln!("Uso: stack converge [--stack <UUID>] | stack events --stack <UUID> | stack resolve --stack <UUID> [--field <NAME>]");
}

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    let mut i = 2;
    while i < args.len() {
        if args[i] == flag {
            i += 1;
            if i < args.len() {
                return Some(args[i].clone());
            }
        }
        i += 1;
    }
    None
}

fn parse_uuid(s: &str) -> Uuid {
    match Uuid::parse_str(s) {
        Ok(u) => u,
        Err(_) => {
            eprintln!("[stack] UUID inválido: {s}");
            std::process::exit(2);
        }
    }
}

fn require_stack(args: &[String]) -> Uuid {
    match parse_flag(args, "--stack") {
        Some(s) => parse_uuid(&s),
        None => {
            usage();
            std::process::exit(2);
        }
    }
}

fn describe(kind: &ConvergeEventKind) -> String {
    match kind {
        ConvergeEventKind::StackInitialized { resource_count, .. } => {
            format!("StackInitialized resources={resource_count}")
        }
        ConvergeEventKind::InvocationStarted { logical_id, physical_id, .. } => {
            format!("InvocationStarted {logical_id} {physical_id}")
        }
        ConvergeEventKind::InvocationApplied { logical_id, physical_id, .. } => {
            format!("InvocationApplied {logical_id} {physical_id}")
        }
        ConvergeEventKind::InvocationSkipped { logical_id, physical_id } => {
            format!("InvocationSkipped {logical_id} {physical_id}")
        }
        ConvergeEventKind::InvocationFailed { logical_id, error, .. } => {
            format!("InvocationFailed {logical_id}: {error}")
        }
        ConvergeEventKind::ResourceRemoved { logical_id } => format!("ResourceRemoved {logical_id}"),
        ConvergeEventKind::PassCompleted { pass_fingerprint } => {
            format!("PassCompleted {pass_fingerprint}")
        }
    }
}
