//! Idempotencia del Lifecycle Trigger: una invocación por configuración
//! distinta, sin importar cuántos pases de convergencia corran.
use std::sync::Arc;

use serde_json::json;
use stack_adapters::targets::RecordingTarget;
use stack_core::{build_stack_plan, ConfigPayload, ConvergenceEngine, InitializerSpec, ResourceOutcome};

fn payload_ab() -> ConfigPayload {
    ConfigPayload::new()
        .with("credsSecretName", "a")
        .with("dbSecretName", "b")
}

#[test]
fn unchanged_plan_invokes_exactly_once() {
    let target = Arc::new(RecordingTarget::new("db-schema-init", json!({"appSecretName": "app-user"})));
    let mut engine = ConvergenceEngine::new();

    let plan = build_stack_plan(vec![InitializerSpec::new("db-init", payload_ab(), target.clone())]);
    let first = engine.converge(&plan).expect("first pass");
    assert_eq!(first.invocations(), 1, "first pass must invoke");

    // Segundo pase con plan idéntico (reconstruido, como haría el caller)
    let plan2 = build_stack_plan(vec![InitializerSpec::new("db-init", payload_ab(), target.clone())]);
    let second = engine.converge(&plan2).expect("second pass");
    assert_eq!(second.invocations(), 0, "second pass must skip");
    assert_eq!(second.outcomes[0].outcome, ResourceOutcome::Skipped);

    assert_eq!(target.calls(), 1, "target must have run exactly once");
    // La identidad física no cambió entre pases
    assert_eq!(first.outcomes[0].physical_id, second.outcomes[0].physical_id);
}

#[test]
fn key_order_does_not_retrigger() {
    let target = Arc::new(RecordingTarget::new("db-schema-init", json!({"ok": true})));
    let mut engine = ConvergenceEngine::new();

    let p1 = ConfigPayload::new()
        .with("credsSecretName", "a")
        .with("dbSecretName", "b");
    let plan = build_stack_plan(vec![InitializerSpec::new("db-init", p1, target.clone())]);
    engine.converge(&plan).expect("first pass");

    // Mismo payload construido en orden inverso
    let p2 = ConfigPayload::new()
        .with("dbSecretName", "b")
        .with("credsSecretName", "a");
    let plan2 = build_stack_plan(vec![InitializerSpec::new("db-init", p2, target.clone())]);
    let report = engine.converge(&plan2).expect("second pass");

    assert_eq!(report.invocations(), 0, "reordered payload must fingerprint identically");
    assert_eq!(target.calls(), 1);
}

#[test]
fn changed_field_triggers_exactly_one_new_invocation() {
    let target = Arc::new(RecordingTarget::new("db-schema-init", json!({"ok": true})));
    let mut engine = ConvergenceEngine::new();

    let plan = build_stack_plan(vec![InitializerSpec::new("db-init", payload_ab(), target.clone())]);
    let first = engine.converge(&plan).expect("first pass");

    // dbSecretName: "b" -> "c"
    let changed = ConfigPayload::new()
        .with("credsSecretName", "a")
        .with("dbSecretName", "c");
    let plan2 = build_stack_plan(vec![InitializerSpec::new("db-init", changed, target.clone())]);
    let second = engine.converge(&plan2).expect("second pass");

    assert_eq!(second.invocations(), 1, "changed payload must re-invoke");
    assert_ne!(first.outcomes[0].physical_id, second.outcomes[0].physical_id,
               "new fingerprint must yield a new physical identity");
    assert_eq!(target.calls(), 2);
}

#[test]
fn version_bump_retriggers_with_identical_payload() {
    let v1 = Arc::new(RecordingTarget::new("db-schema-init", json!({"ok": true})));
    let mut engine = ConvergenceEngine::new();

    let plan = build_stack_plan(vec![InitializerSpec::new("db-init", payload_ab(), v1.clone())]);
    let first = engine.converge(&plan).expect("first pass");

    // Mismo payload, target con versión subida (bug fix del propio target)
    let v2 = Arc::new(RecordingTarget::new("db-schema-init", json!({"ok": true})).with_version(2));
    let plan2 = build_stack_plan(vec![InitializerSpec::new("db-init", payload_ab(), v2.clone())]);
    let second = engine.converge(&plan2).expect("second pass");

    assert_eq!(second.invocations(), 1, "version bump must force re-invocation");
    assert_ne!(first.outcomes[0].physical_id, second.outcomes[0].physical_id);
    assert_eq!(v1.calls() + v2.calls(), 2);
}
