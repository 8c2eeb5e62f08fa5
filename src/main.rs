//! Demo del stack: ensambla la topología y corre dos pases de convergencia
//! para mostrar la idempotencia del inicializador.
use stack_core::ConvergenceEngine;
use stackflow_rust::config::CONFIG;
use stackflow_rust::topology::StackTopology;

fn main() {
    let cfg = &*CONFIG;
    println!("=== stackflow demo: stack '{}' ===", cfg.stack_name);

    let topology = match StackTopology::assemble(cfg) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("[stackflow] configuration error: {e}");
            std::process::exit(2);
        }
    };

    println!("vpc: {}", topology.network.vpc_name);
    println!("cluster: {}", topology.database.cluster_arn);
    println!("db ingress: {} <- {} :{}",
             topology.initializer.db_ingress.to.id(),
             topology.initializer.db_ingress.from.id(),
             topology.initializer.db_ingress.port);
    println!("execution grants: {}", topology.initializer.boundary.policy.len());

    let mut engine = ConvergenceEngine::new();

    // Pase 1: primer despliegue, el inicializador corre
    match engine.converge(&topology.plan()) {
        Ok(report) => println!("pass 1: {} invocation(s)", report.invocations()),
        Err(e) => {
            eprintln!("[stackflow] deploy failed: {e}");
            std::process::exit(5);
        }
    }

    // Pase 2: redeploy sin cambios, cero invocaciones
    match engine.converge(&topology.plan()) {
        Ok(report) => println!("pass 2: {} invocation(s) (unchanged config)", report.invocations()),
        Err(e) => {
            eprintln!("[stackflow] redeploy failed: {e}");
            std::process::exit(5);
        }
    }

    match engine.resolve(&topology.service.app_secret) {
        Ok(value) => println!("service consumes app secret: {value}"),
        Err(e) => {
            eprintln!("[stackflow] resolve failed: {e}");
            std::process::exit(5);
        }
    }

    if let Some(variants) = engine.event_variants() {
        println!("event log: {}", variants.join(""));
    }
}
