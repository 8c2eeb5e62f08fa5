//! Ensamblado end-to-end de la topología: wiring de fronteras de acceso y
//! convergencia del inicializador a través del plan del stack.
use stack_core::{ConvergenceEngine, CoreError};
use stackflow_rust::config::StackConfig;
use stackflow_rust::topology::{StackTopology, DB_INIT_LOGICAL_ID};

fn test_config() -> StackConfig {
    StackConfig { stack_name: "teststack".to_string(),
                  db_name: "appdb".to_string(),
                  admin_secret_name: "teststack-db-admin".to_string(),
                  db_secret_name: "teststack-db-conn".to_string(),
                  invoke_timeout_ms: 5_000 }
}

#[test]
fn boundary_wiring_is_least_privilege() {
    let topo = StackTopology::assemble(&test_config()).expect("assemble");

    // Ejecución: línea base (2) + secretos + cluster
    let policy = &topo.initializer.boundary.policy;
    assert_eq!(policy.len(), 4);
    let resources: Vec<&str> = policy.grants()
                                     .flat_map(|g| g.resources().iter().map(|r| r.as_str()))
                                     .collect();
    assert!(resources.contains(&"teststack-db-admin"));
    assert!(resources.contains(&"teststack-db-conn"));
    assert!(resources.contains(&"cluster:teststack-db"));

    // Invocación: scope exclusivo en el target del inicializador
    assert_eq!(topo.initializer.invoker.grant().resources(), ["db-schema-init".to_string()]);

    // La base sólo admite tráfico desde el grupo del inicializador
    let ingress = &topo.initializer.db_ingress;
    assert_eq!(ingress.to, topo.database.security_group);
    assert_eq!(ingress.from, topo.network.initializer_sg);
    assert_eq!(ingress.port, 5432);
}

#[test]
fn placement_uses_private_subnets() {
    let topo = StackTopology::assemble(&test_config()).expect("assemble");
    let placement = &topo.initializer.boundary.placement;
    assert_eq!(placement.subnet_ids, topo.network.private_subnet_ids);
    assert_eq!(placement.security_group, topo.network.initializer_sg);
}

#[test]
fn deploy_and_redeploy_run_initializer_once() {
    let topo = StackTopology::assemble(&test_config()).expect("assemble");
    let mut engine = ConvergenceEngine::new();

    let first = engine.converge(&topo.plan()).expect("deploy");
    assert_eq!(first.invocations(), 1);

    let second = engine.converge(&topo.plan()).expect("redeploy");
    assert_eq!(second.invocations(), 0, "unchanged topology must skip");

    // El servicio resuelve el secreto publicado por el inicializador
    let value = engine.resolve(&topo.service.app_secret).expect("resolve");
    assert_eq!(value, serde_json::json!("appdb-app-user"));
}

#[test]
fn changed_db_secret_changes_identity() {
    let mut engine = ConvergenceEngine::new();

    let topo = StackTopology::assemble(&test_config()).expect("assemble");
    let first = engine.converge(&topo.plan()).expect("deploy");

    let mut cfg = test_config();
    cfg.db_secret_name = "teststack-db-conn-v2".to_string();
    let topo2 = StackTopology::assemble(&cfg).expect("assemble");
    let second = engine.converge(&topo2.plan()).expect("redeploy");

    assert_eq!(second.invocations(), 1, "changed secret ref must re-run");
    assert_ne!(first.outcomes[0].physical_id, second.outcomes[0].physical_id);
}

#[test]
fn invalid_secret_ref_aborts_before_any_invocation() {
    let mut cfg = test_config();
    cfg.admin_secret_name = "  ".to_string();
    let err = StackTopology::assemble(&cfg).expect_err("must fail fast");
    let msg = err.to_string();
    assert!(msg.contains("secret reference"), "unexpected message: {msg}");
}

#[test]
fn resolve_before_deploy_refuses() {
    let topo = StackTopology::assemble(&test_config()).expect("assemble");
    let mut engine = ConvergenceEngine::new();
    // Pase sobre un plan vacío: el recurso nunca se registró
    engine.converge(&stack_core::build_stack_plan(vec![])).expect("empty pass");

    let err = engine.resolve(&topo.service.app_secret).expect_err("must refuse");
    match err {
        CoreError::UnknownResource(id) => assert_eq!(id, DB_INIT_LOGICAL_ID),
        other => panic!("expected UnknownResource, got {:?}", other),
    }
}
