mod common;
use common::*;

use std::sync::Arc;

use flowscope::registry::{LoadError, ModuleRegistry};
use flowscope::types::ModuleStatus;

#[tokio::test]
async fn load_parses_and_extracts_definitions() {
    let registry = ModuleRegistry::new(MapSource::new(&[("com.acme.orders", ORDERS_MODULE)]));

    let module = registry.load("com.acme.orders").await.expect("loaded");
    assert_eq!(module.status, ModuleStatus::Loaded);
    assert!(module.errors.is_empty());
    assert_eq!(module.raw_content, ORDERS_MODULE);
    assert_eq!(module.imports, vec!["com.acme.shared"]);

    let defs = module.definitions.expect("definitions on loaded module");
    assert_eq!(defs.components.len(), 2);
    assert_eq!(defs.flows.len(), 2);
    assert_eq!(defs.context.len(), 1);
    assert_eq!(defs.flows[0].steps.len(), 4);
}

#[tokio::test]
async fn load_accepts_namespaced_layout() {
    let registry = ModuleRegistry::new(MapSource::new(&[("com.acme.alerts", NAMESPACED_MODULE)]));

    let module = registry.load("com.acme.alerts").await.expect("loaded");
    let defs = module.definitions.expect("definitions");
    assert_eq!(defs.flows.len(), 1);
    assert_eq!(defs.flows[0].name, "Alert");
    assert_eq!(defs.components[0].component_type.as_deref(), Some("StdLib:SendEmail"));
}

#[tokio::test]
async fn second_load_is_idempotent_and_skips_the_fetch() {
    let source = Arc::new(MapSource::new(&[("com.acme.orders", ORDERS_MODULE)]));
    let registry = ModuleRegistry::with_source(source.clone());

    let first = registry.load("com.acme.orders").await.expect("loaded");
    let second = registry.load("com.acme.orders").await.expect("cached");

    assert_eq!(source.fetch_count(), 1);
    assert_eq!(first.status, second.status);
    assert_eq!(first.raw_content, second.raw_content);
    assert_eq!(first.definitions, second.definitions);
}

#[tokio::test]
async fn concurrent_load_triggers_exactly_one_fetch() {
    let (source, gate) = GatedSource::new(ORDERS_MODULE);
    let source = Arc::new(source);
    let registry = ModuleRegistry::with_source(source.clone());

    let first = {
        let registry = registry.clone();
        tokio::spawn(async move { registry.load("com.acme.orders").await })
    };
    // Let the first load reach its fetch before issuing the second.
    while source.fetch_count() == 0 {
        tokio::task::yield_now().await;
    }

    let second = registry.load("com.acme.orders").await;
    assert!(second.is_none(), "in-flight dedup returns None");

    gate.notify_one();
    let first = first.await.expect("task").expect("loaded");
    assert_eq!(first.status, ModuleStatus::Loaded);
    assert_eq!(source.fetch_count(), 1);

    // After completion the caller can re-issue and hit the cache.
    let third = registry.load("com.acme.orders").await.expect("cached");
    assert_eq!(third.status, ModuleStatus::Loaded);
    assert_eq!(source.fetch_count(), 1);
}

#[tokio::test]
async fn parse_failure_is_contained_and_raw_content_retained() {
    let registry = ModuleRegistry::new(MapSource::new(&[("com.acme.bad", MALFORMED_MODULE)]));

    let module = registry.load("com.acme.bad").await.expect("entry persisted");
    assert_eq!(module.status, ModuleStatus::Error);
    assert!(module.parsed_content.is_none());
    assert!(module.definitions.is_none());
    assert_eq!(module.raw_content, MALFORMED_MODULE);
    assert!(matches!(module.errors[0], LoadError::Parse(_)));
    assert!(module.errors[0].to_string().contains("parsing failed"));
}

#[tokio::test]
async fn transport_rejection_is_terminal_and_recorded() {
    let registry = ModuleRegistry::new(RejectingSource);

    let module = registry.load("com.acme.gone").await.expect("entry persisted");
    assert_eq!(module.status, ModuleStatus::Error);
    assert!(matches!(module.errors[0], LoadError::Transport(_)));
    assert!(module.errors[0].to_string().contains("connection refused"));

    // The entry is visible through the read surface too.
    let stored = registry.get_loaded_module("com.acme.gone").expect("stored");
    assert_eq!(stored.status, ModuleStatus::Error);
}

#[tokio::test]
async fn missing_content_is_a_transport_error() {
    let registry = ModuleRegistry::new(MapSource::new(&[]));

    let module = registry.load("com.acme.unknown").await.expect("entry persisted");
    assert_eq!(module.status, ModuleStatus::Error);
    assert!(module.errors[0].to_string().contains("no content"));
}

#[tokio::test]
async fn failed_load_can_be_retried() {
    let source = Arc::new(MapSource::new(&[]));
    let registry = ModuleRegistry::with_source(source.clone());

    let first = registry.load("com.acme.retry").await.expect("error entry");
    assert_eq!(first.status, ModuleStatus::Error);

    // A failed entry does not satisfy the cache check, so a second load
    // fetches again — the in-flight flag was released by the failure.
    let second = registry.load("com.acme.retry").await.expect("error entry");
    assert_eq!(second.status, ModuleStatus::Error);
    assert_eq!(source.fetch_count(), 2);
    // Diagnostics do not pile up across attempts.
    assert_eq!(second.errors.len(), 1);
}

#[tokio::test]
async fn empty_fqn_is_rejected() {
    let registry = ModuleRegistry::new(MapSource::new(&[]));
    assert!(registry.load("").await.is_none());
    assert!(registry.get_all_loaded_modules().is_empty());
}

#[tokio::test]
async fn all_loaded_modules_lists_every_entry() {
    let registry = ModuleRegistry::new(MapSource::new(&[
        ("com.acme.orders", ORDERS_MODULE),
        ("com.acme.alerts", NAMESPACED_MODULE),
    ]));
    registry.load("com.acme.orders").await;
    registry.load("com.acme.alerts").await;
    registry.load("com.acme.missing").await;

    let all = registry.get_all_loaded_modules();
    assert_eq!(all.len(), 3);
    assert_eq!(
        all.iter().filter(|m| m.status == ModuleStatus::Loaded).count(),
        2
    );
}
