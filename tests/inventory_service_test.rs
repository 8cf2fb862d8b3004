//! Tests for InventoryService over the JSON file store

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use logwall::application::services::{InventoryService, Preset};
use logwall::application::ApplicationError;
use logwall::config::Settings;
use logwall::domain::Log;
use logwall::infrastructure::traits::{
    InventoryStore, JsonInventoryStore, MemoryInventoryStore, RealFileSystem,
};
use logwall::infrastructure::ServiceContainer;
use logwall::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn json_service(temp: &TempDir) -> (InventoryService, PathBuf) {
    let path = temp.path().join("data").join("inventory.json");
    let store = JsonInventoryStore::new(Arc::new(RealFileSystem), &path);
    (InventoryService::new(Arc::new(store)), path)
}

#[test]
fn given_missing_file_when_listing_then_inventory_is_empty() {
    let temp = TempDir::new().unwrap();
    let (service, path) = json_service(&temp);

    assert!(service.list().unwrap().is_empty());
    assert!(!path.exists());
}

#[test]
fn given_added_logs_when_reloading_then_persisted_in_order() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let (service, path) = json_service(&temp);

    // Act
    service.add(Log::long(270)).unwrap();
    service.add(Log::short(250)).unwrap();

    // Assert: a fresh store sees the same logs
    let reopened = JsonInventoryStore::new(Arc::new(RealFileSystem), &path);
    assert_eq!(
        reopened.load().unwrap(),
        vec![Log::long(270), Log::short(250)]
    );
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains(r#""length": "long""#));
}

#[test]
fn given_legacy_file_when_loading_then_records_converted() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("inventory.json");
    std::fs::write(&path, r#"[{"long": 280}, {"short": 260}, {"bogus": 1}]"#).unwrap();
    let store = JsonInventoryStore::new(Arc::new(RealFileSystem), &path);

    let logs = store.load().unwrap();

    assert_eq!(logs, vec![Log::long(280), Log::short(260)]);
}

#[test]
fn given_corrupt_file_when_loading_then_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("inventory.json");
    std::fs::write(&path, "not json").unwrap();
    let store = JsonInventoryStore::new(Arc::new(RealFileSystem), &path);

    assert!(matches!(
        store.load(),
        Err(ApplicationError::OperationFailed { .. })
    ));
}

#[test]
fn given_inventory_when_removing_then_returns_removed_log() {
    let service = InventoryService::new(Arc::new(MemoryInventoryStore::new(vec![
        Log::long(270),
        Log::short(280),
        Log::long(240),
    ])));

    assert_eq!(service.remove(1).unwrap(), Some(Log::short(280)));
    assert_eq!(service.remove(9).unwrap(), None);
    assert_eq!(service.list().unwrap(), vec![Log::long(270), Log::long(240)]);
}

#[test]
fn given_zero_diameter_when_adding_then_rejected() {
    let service = InventoryService::new(Arc::new(MemoryInventoryStore::default()));

    let err = service.add(Log::long(0)).unwrap_err();

    assert!(matches!(err, ApplicationError::InvalidRecord { .. }));
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn given_import_json_when_importing_then_replaces_inventory() {
    let temp = TempDir::new().unwrap();
    let (service, _) = json_service(&temp);
    service.add(Log::long(300)).unwrap();

    let count = service
        .import(r#"[{"short": 250}, {"length": "long", "diameter": 275}]"#)
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(service.list().unwrap(), vec![Log::short(250), Log::long(275)]);
}

#[test]
fn given_bad_import_when_importing_then_inventory_untouched() {
    let service =
        InventoryService::new(Arc::new(MemoryInventoryStore::new(vec![Log::long(300)])));

    assert!(service.import(r#"[{"medium": 250}]"#).is_err());
    assert_eq!(service.list().unwrap(), vec![Log::long(300)]);
}

#[test]
fn given_preset_when_applied_then_summary_counts_classes() {
    let temp = TempDir::new().unwrap();
    let (service, _) = json_service(&temp);

    let count = service.apply_preset(Preset::Medium).unwrap();
    let summary = service.summary().unwrap();

    assert_eq!(count, 8);
    assert_eq!(summary.long, 4);
    assert_eq!(summary.short, 4);
    assert_eq!(summary.sorted.first(), Some(&Log::short(250)));

    service.clear().unwrap();
    assert_eq!(service.summary().unwrap().total, 0);
}

#[test]
fn given_container_when_built_then_uses_configured_inventory_path() {
    let temp = TempDir::new().unwrap();
    let settings = Settings {
        inventory_path: temp.path().join("inv.json"),
        ..Settings::default()
    };

    let container = ServiceContainer::new(settings);
    container.inventory.apply_preset(Preset::Small).unwrap();

    assert!(temp.path().join("inv.json").exists());
    assert_eq!(container.store.load().unwrap().len(), 3);
}
