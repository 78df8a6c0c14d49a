use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use simple_core::{ScheduleCommand, ScheduleIntent};

use crate::error::EngineError;
use crate::timer::FireCallback;

use super::ScheduleRegistry;

fn noop() -> FireCallback {
    Arc::new(|| Box::pin(async {}))
}

fn intent(command: ScheduleCommand, expression: &str) -> ScheduleIntent {
    ScheduleIntent {
        label_key: format!("simple.schedules.{}", command),
        label_value: expression.to_string(),
        command,
    }
}

#[tokio::test]
async fn add_then_find_round_trips_the_intent() {
    let registry = ScheduleRegistry::new();
    let wanted = intent(ScheduleCommand::Restart, "0 0 3 * * *");

    registry.add("web", wanted.clone(), noop()).unwrap();

    let view = registry.find("web").unwrap();
    assert_eq!(view.container_name, "web");
    assert_eq!(view.intent, wanted);
    assert!(view.next_fire.is_some());
}

#[tokio::test]
async fn add_rejects_duplicate_names() {
    let registry = ScheduleRegistry::new();
    registry
        .add("web", intent(ScheduleCommand::Start, "0 0 3 * * *"), noop())
        .unwrap();

    let err = registry
        .add("web", intent(ScheduleCommand::Stop, "0 0 4 * * *"), noop())
        .unwrap_err();
    assert!(matches!(err, EngineError::DuplicateSchedule(name) if name == "web"));
    // The original entry is untouched.
    assert_eq!(registry.find("web").unwrap().intent.command, ScheduleCommand::Start);
}

#[tokio::test]
async fn add_rejects_invalid_expression_without_inserting() {
    let registry = ScheduleRegistry::new();
    let err = registry
        .add("web", intent(ScheduleCommand::Start, "bogus"), noop())
        .unwrap_err();
    assert!(matches!(err, EngineError::Expression { .. }));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn remove_deletes_the_entry() {
    let registry = ScheduleRegistry::new();
    registry
        .add("web", intent(ScheduleCommand::Stop, "0 0 4 * * *"), noop())
        .unwrap();

    registry.remove("web").unwrap();
    assert!(registry.find("web").is_none());
    assert!(registry.is_empty());
}

#[tokio::test]
async fn remove_missing_entry_fails() {
    let registry = ScheduleRegistry::new();
    let err = registry.remove("ghost").unwrap_err();
    assert!(matches!(err, EngineError::ScheduleNotFound(name) if name == "ghost"));
}

#[tokio::test]
async fn register_replaces_an_existing_entry() {
    let registry = ScheduleRegistry::new();
    registry
        .add("web", intent(ScheduleCommand::Restart, "0 0 3 * * *"), noop())
        .unwrap();

    let replacement = intent(ScheduleCommand::Stop, "0 0 4 * * *");
    registry.register("web", replacement.clone(), noop()).unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.find("web").unwrap().intent, replacement);
}

#[tokio::test]
async fn register_replacement_stops_the_old_timer() {
    let registry = ScheduleRegistry::new();
    let fires = Arc::new(AtomicUsize::new(0));
    let counting: FireCallback = {
        let fires = Arc::clone(&fires);
        Arc::new(move || {
            let fires = Arc::clone(&fires);
            Box::pin(async move {
                fires.fetch_add(1, Ordering::SeqCst);
            })
        })
    };

    // Every second, so a leaked timer keeps advancing the counter.
    registry
        .add("web", intent(ScheduleCommand::Restart, "* * * * * *"), counting)
        .unwrap();

    registry
        .register("web", intent(ScheduleCommand::Stop, "0 0 3 * * *"), noop())
        .unwrap();

    // Let any tick already past its select settle before sampling.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let settled = fires.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(
        fires.load(Ordering::SeqCst),
        settled,
        "replaced timer kept firing"
    );
}

#[tokio::test]
async fn register_creates_when_absent() {
    let registry = ScheduleRegistry::new();
    registry
        .register("db", intent(ScheduleCommand::Start, "0 30 6 * * *"), noop())
        .unwrap();
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn list_snapshots_all_entries() {
    let registry = ScheduleRegistry::new();
    registry
        .add("web", intent(ScheduleCommand::Restart, "0 0 3 * * *"), noop())
        .unwrap();
    registry
        .add("db", intent(ScheduleCommand::Stop, "0 0 4 * * *"), noop())
        .unwrap();

    let mut names: Vec<String> = registry.list().into_iter().map(|v| v.container_name).collect();
    names.sort();
    assert_eq!(names, vec!["db", "web"]);
}

#[tokio::test]
async fn drain_stops_and_clears_everything() {
    let registry = ScheduleRegistry::new();
    registry
        .add("web", intent(ScheduleCommand::Restart, "0 0 3 * * *"), noop())
        .unwrap();
    registry
        .add("db", intent(ScheduleCommand::Stop, "0 0 4 * * *"), noop())
        .unwrap();

    registry.drain();
    assert!(registry.is_empty());
    assert!(registry.list().is_empty());
}
