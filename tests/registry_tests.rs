//! Tests for Registry
//!
//! These tests verify:
//! - Startup seeding from the store
//! - Create/get/list/update/delete with store mirroring
//! - Error signals for duplicates, absent plates, and plate mismatch
//! - Traversal endpoints

use std::fs;

use platereg::index::Traversal;
use platereg::{Config, Registry, RegistryError, Vehicle};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_registry() -> (TempDir, Registry) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .build()
        .unwrap();
    let registry = Registry::open(config).unwrap();
    (temp_dir, registry)
}

fn vehicle(plate: &str) -> Vehicle {
    Vehicle::new(plate, "Toyota", "Red", "Corolla", 25000.0)
}

fn plates(vehicles: &[Vehicle]) -> Vec<&str> {
    vehicles.iter().map(|v| v.plate.as_str()).collect()
}

// =============================================================================
// Startup Tests
// =============================================================================

#[test]
fn test_open_creates_store_file() {
    let (temp, registry) = setup_registry();

    assert!(temp.path().join("vehicles.csv").exists());
    assert!(registry.is_empty());
}

#[test]
fn test_open_seeds_index_from_store() {
    let temp_dir = TempDir::new().unwrap();
    {
        let registry = Registry::open_path(temp_dir.path()).unwrap();
        registry.create(vehicle("M")).unwrap();
        registry.create(vehicle("F")).unwrap();
        registry.create(vehicle("T")).unwrap();
    }

    // A fresh registry over the same directory sees the persisted records
    let reopened = Registry::open_path(temp_dir.path()).unwrap();
    assert_eq!(reopened.len(), 3);
    assert_eq!(plates(&reopened.list()), vec!["F", "M", "T"]);
}

#[test]
fn test_open_skips_duplicate_rows_keeping_first() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vehicles.csv");
    fs::write(
        &path,
        "plate,brand,color,model,price\n\
         ABC-123,Toyota,Red,Corolla,25000\n\
         ABC-123,Honda,Black,Civic,30000\n",
    )
    .unwrap();

    let registry = Registry::open_path(temp_dir.path()).unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("ABC-123").unwrap().brand, "Toyota");
}

#[test]
fn test_open_skips_malformed_rows() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("vehicles.csv");
    fs::write(
        &path,
        "plate,brand,color,model,price\n\
         ABC-123,Toyota,Red,Corolla,25000\n\
         BAD-999,Honda,Black,Civic,not-a-price\n",
    )
    .unwrap();

    let registry = Registry::open_path(temp_dir.path()).unwrap();

    assert_eq!(registry.len(), 1);
}

// =============================================================================
// Create Tests
// =============================================================================

#[test]
fn test_create_and_get() {
    let (_temp, registry) = setup_registry();
    let v = vehicle("ABC-123");

    registry.create(v.clone()).unwrap();

    assert_eq!(registry.get("ABC-123").unwrap(), v);
}

#[test]
fn test_create_duplicate_plate_conflicts() {
    let (_temp, registry) = setup_registry();
    registry.create(vehicle("ABC-123")).unwrap();

    let err = registry.create(vehicle("ABC-123")).unwrap_err();

    assert!(matches!(err, RegistryError::DuplicatePlate(_)));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_create_persists_to_store() {
    let temp_dir = TempDir::new().unwrap();
    {
        let registry = Registry::open_path(temp_dir.path()).unwrap();
        registry.create(vehicle("ABC-123")).unwrap();
    }

    let reopened = Registry::open_path(temp_dir.path()).unwrap();
    assert!(reopened.get("ABC-123").is_ok());
}

#[test]
fn test_create_with_comma_in_brand_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let v = Vehicle::new("ABC-123", "Rolls,Royce", "Silver", "Phantom", 450000.0);
    {
        let registry = Registry::open_path(temp_dir.path()).unwrap();
        registry.create(v.clone()).unwrap();
    }

    let reopened = Registry::open_path(temp_dir.path()).unwrap();
    assert_eq!(reopened.get("ABC-123").unwrap(), v);
}

// =============================================================================
// Get/List Tests
// =============================================================================

#[test]
fn test_get_absent_plate_not_found() {
    let (_temp, registry) = setup_registry();

    let err = registry.get("ZZZ-999").unwrap_err();

    assert!(matches!(err, RegistryError::PlateNotFound(_)));
}

#[test]
fn test_list_returns_ascending_plate_order() {
    let (_temp, registry) = setup_registry();
    for plate in ["M", "F", "T", "A", "K"] {
        registry.create(vehicle(plate)).unwrap();
    }

    assert_eq!(plates(&registry.list()), vec!["A", "F", "K", "M", "T"]);
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_replaces_payload() {
    let (_temp, registry) = setup_registry();
    registry.create(vehicle("ABC-123")).unwrap();

    let updated = Vehicle::new("ABC-123", "Honda", "Black", "Civic", 30000.0);
    registry.update("ABC-123", updated.clone()).unwrap();

    assert_eq!(registry.get("ABC-123").unwrap(), updated);
}

#[test]
fn test_update_plate_mismatch_rejected_before_index() {
    let (_temp, registry) = setup_registry();
    registry.create(vehicle("ABC-123")).unwrap();

    let err = registry
        .update("ABC-123", vehicle("DEF-456"))
        .unwrap_err();

    assert!(matches!(err, RegistryError::PlateMismatch { .. }));
    // Original record untouched
    assert_eq!(registry.get("ABC-123").unwrap().brand, "Toyota");
    assert!(registry.get("DEF-456").is_err());
}

#[test]
fn test_update_absent_plate_not_found() {
    let (_temp, registry) = setup_registry();

    let err = registry.update("ZZZ-999", vehicle("ZZZ-999")).unwrap_err();

    assert!(matches!(err, RegistryError::PlateNotFound(_)));
}

#[test]
fn test_update_persists_to_store() {
    let temp_dir = TempDir::new().unwrap();
    {
        let registry = Registry::open_path(temp_dir.path()).unwrap();
        registry.create(vehicle("ABC-123")).unwrap();
        registry
            .update("ABC-123", Vehicle::new("ABC-123", "Honda", "Black", "Civic", 30000.0))
            .unwrap();
    }

    let reopened = Registry::open_path(temp_dir.path()).unwrap();
    assert_eq!(reopened.get("ABC-123").unwrap().brand, "Honda");
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_removes_record() {
    let (_temp, registry) = setup_registry();
    registry.create(vehicle("ABC-123")).unwrap();

    registry.delete("ABC-123").unwrap();

    assert!(registry.get("ABC-123").is_err());
    assert!(registry.is_empty());
}

#[test]
fn test_delete_absent_plate_not_found() {
    let (_temp, registry) = setup_registry();

    let err = registry.delete("ZZZ-999").unwrap_err();

    assert!(matches!(err, RegistryError::PlateNotFound(_)));
}

#[test]
fn test_delete_persists_to_store() {
    let temp_dir = TempDir::new().unwrap();
    {
        let registry = Registry::open_path(temp_dir.path()).unwrap();
        registry.create(vehicle("ABC-123")).unwrap();
        registry.create(vehicle("DEF-456")).unwrap();
        registry.delete("ABC-123").unwrap();
    }

    let reopened = Registry::open_path(temp_dir.path()).unwrap();
    assert_eq!(reopened.len(), 1);
    assert!(reopened.get("DEF-456").is_ok());
}

// =============================================================================
// Traversal Tests
// =============================================================================

#[test]
fn test_traverse_orders() {
    let (_temp, registry) = setup_registry();
    for plate in ["M", "F", "T", "A", "K"] {
        registry.create(vehicle(plate)).unwrap();
    }

    assert_eq!(
        plates(&registry.traverse(Traversal::Inorder)),
        vec!["A", "F", "K", "M", "T"]
    );
    assert_eq!(
        plates(&registry.traverse(Traversal::Preorder)),
        vec!["M", "F", "A", "K", "T"]
    );
    assert_eq!(
        plates(&registry.traverse(Traversal::Postorder)),
        vec!["A", "K", "F", "T", "M"]
    );
}

#[test]
fn test_delete_two_child_root_then_list() {
    let (_temp, registry) = setup_registry();
    for plate in ["M", "F", "T", "A", "K"] {
        registry.create(vehicle(plate)).unwrap();
    }

    registry.delete("M").unwrap();

    assert_eq!(plates(&registry.list()), vec!["A", "F", "K", "T"]);
    assert_eq!(
        plates(&registry.traverse(Traversal::Preorder)),
        vec!["T", "F", "A", "K"]
    );
}
