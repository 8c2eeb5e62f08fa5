use stack_core::{build_stack_plan, ConvergeEventKind, ConvergenceEngine, EventStore, InMemoryEventStore};
use uuid::Uuid;

#[test]
fn integration_smoke_inmemory_store_and_engine() {
    // InMemory event store should allow append and list deterministically
    let mut store = InMemoryEventStore::default();
    let stack_id = Uuid::new_v4();

    let ev = store.append_kind(stack_id,
                               ConvergeEventKind::StackInitialized { plan_hash: "h1".to_string(),
                                                                     resource_count: 0 });
    assert_eq!(ev.seq, 0);

    // Engine over the pre-seeded store; an empty plan completes the pass
    let ledger = stack_core::InMemoryStackLedger::new();
    let mut engine = ConvergenceEngine::new_with_stores(store, ledger);
    engine.set_default_stack_id(stack_id);

    let plan = build_stack_plan(vec![]);
    let report = engine.converge(&plan).expect("empty plan converges");
    assert_eq!(report.invocations(), 0);

    let events = engine.event_store().list(stack_id);
    assert!(events.iter().any(|e| matches!(e.kind, ConvergeEventKind::StackInitialized { .. })),
            "StackInitialized missing");
    assert!(events.iter().any(|e| matches!(e.kind, ConvergeEventKind::PassCompleted { .. })),
            "PassCompleted missing");
    // Compact variants: I then C
    assert_eq!(engine.event_variants().expect("variants"), vec!["I", "C"]);
}
