//! Tests for VehicleStore
//!
//! These tests verify:
//! - File and header creation on open
//! - Append/load round trips, including delimiter and quote escaping
//! - Malformed rows skipped on load
//! - Full-rewrite remove and rewrite mirrors

use std::fs;

use platereg::store::VehicleStore;
use platereg::Vehicle;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_store() -> (TempDir, VehicleStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = VehicleStore::open(&temp_dir.path().join("vehicles.csv")).unwrap();
    (temp_dir, store)
}

fn vehicle(plate: &str, price: f64) -> Vehicle {
    Vehicle::new(plate, "Toyota", "Red", "Corolla", price)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_file_with_header() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data").join("vehicles.csv");

    let _store = VehicleStore::open(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "plate,brand,color,model,price\n");
}

#[test]
fn test_open_existing_file_preserves_contents() {
    let (_temp, store) = setup_store();
    store.append(&vehicle("ABC-123", 25000.0)).unwrap();

    let reopened = VehicleStore::open(store.filepath()).unwrap();

    assert_eq!(reopened.load_all().unwrap().len(), 1);
}

// =============================================================================
// Load/Append Tests
// =============================================================================

#[test]
fn test_load_all_empty_store() {
    let (_temp, store) = setup_store();

    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn test_append_and_load_round_trip() {
    let (_temp, store) = setup_store();
    let a = vehicle("ABC-123", 25000.0);
    let b = Vehicle::new("DEF-456", "Honda", "Black", "Civic", 19999.99);

    store.append(&a).unwrap();
    store.append(&b).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded, vec![a, b]);
}

#[test]
fn test_load_skips_row_with_bad_price() {
    let (_temp, store) = setup_store();
    store.append(&vehicle("ABC-123", 25000.0)).unwrap();

    // Inject a row with a non-numeric price
    let mut contents = fs::read_to_string(store.filepath()).unwrap();
    contents.push_str("BAD-999,Honda,Black,Civic,not-a-price\n");
    fs::write(store.filepath(), contents).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].plate, "ABC-123");
}

#[test]
fn test_load_skips_row_with_wrong_field_count() {
    let (_temp, store) = setup_store();

    let mut contents = fs::read_to_string(store.filepath()).unwrap();
    contents.push_str("ABC-123,Toyota,Red\n");
    contents.push_str("DEF-456,Honda,Black,Civic,19999.99\n");
    fs::write(store.filepath(), contents).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].plate, "DEF-456");
}

#[test]
fn test_load_skips_blank_lines() {
    let (_temp, store) = setup_store();

    let mut contents = fs::read_to_string(store.filepath()).unwrap();
    contents.push_str("\nABC-123,Toyota,Red,Corolla,25000\n\n");
    fs::write(store.filepath(), contents).unwrap();

    assert_eq!(store.load_all().unwrap().len(), 1);
}

// =============================================================================
// Field Escaping Tests
// =============================================================================

#[test]
fn test_round_trips_field_containing_comma() {
    let (_temp, store) = setup_store();
    let v = Vehicle::new("ABC-123", "Rolls,Royce", "Silver", "Phantom", 450000.0);

    store.append(&v).unwrap();

    // The delimiter inside the brand must not split the row
    assert_eq!(store.load_all().unwrap(), vec![v]);
}

#[test]
fn test_round_trips_field_containing_quotes() {
    let (_temp, store) = setup_store();
    let v = Vehicle::new("DEF-456", "Jeep", "Black", "Wrangler \"Rubicon\"", 55000.0);

    store.append(&v).unwrap();

    assert_eq!(store.load_all().unwrap(), vec![v]);
}

#[test]
fn test_round_trips_field_containing_newline() {
    let (_temp, store) = setup_store();
    let v = Vehicle::new("GHI-789", "Toyota", "Red\nMetallic", "Corolla", 25000.0);

    store.append(&v).unwrap();

    assert_eq!(store.load_all().unwrap(), vec![v]);
}

#[test]
fn test_escaped_fields_survive_save_all() {
    let (_temp, store) = setup_store();
    let records = vec![
        Vehicle::new("ABC-123", "Rolls,Royce", "Silver", "Phantom", 450000.0),
        vehicle("DEF-456", 30000.0),
    ];

    store.save_all(&records).unwrap();

    assert_eq!(store.load_all().unwrap(), records);
}

#[test]
fn test_comma_field_is_quoted_on_disk() {
    let (_temp, store) = setup_store();
    store
        .append(&Vehicle::new("ABC-123", "Rolls,Royce", "Silver", "Phantom", 450000.0))
        .unwrap();

    let contents = fs::read_to_string(store.filepath()).unwrap();
    assert!(contents.contains("\"Rolls,Royce\""));
}

#[test]
fn test_load_skips_row_with_unterminated_quote() {
    let (_temp, store) = setup_store();
    store.append(&vehicle("ABC-123", 25000.0)).unwrap();

    let mut contents = fs::read_to_string(store.filepath()).unwrap();
    contents.push_str("BAD-999,\"Honda,Black,Civic,30000\n");
    fs::write(store.filepath(), contents).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].plate, "ABC-123");
}

// =============================================================================
// Mutation Mirror Tests
// =============================================================================

#[test]
fn test_save_all_rewrites_file() {
    let (_temp, store) = setup_store();
    store.append(&vehicle("OLD-001", 1000.0)).unwrap();

    let replacement = vec![vehicle("NEW-001", 2000.0), vehicle("NEW-002", 3000.0)];
    store.save_all(&replacement).unwrap();

    assert_eq!(store.load_all().unwrap(), replacement);
}

#[test]
fn test_remove_filters_by_plate() {
    let (_temp, store) = setup_store();
    store.append(&vehicle("ABC-123", 25000.0)).unwrap();
    store.append(&vehicle("DEF-456", 30000.0)).unwrap();

    store.remove("ABC-123").unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].plate, "DEF-456");
}

#[test]
fn test_remove_absent_plate_is_a_noop() {
    let (_temp, store) = setup_store();
    store.append(&vehicle("ABC-123", 25000.0)).unwrap();

    store.remove("ZZZ-999").unwrap();

    assert_eq!(store.load_all().unwrap().len(), 1);
}

#[test]
fn test_rewrite_replaces_matching_record() {
    let (_temp, store) = setup_store();
    store.append(&vehicle("ABC-123", 25000.0)).unwrap();
    store.append(&vehicle("DEF-456", 30000.0)).unwrap();

    let updated = Vehicle::new("ABC-123", "Mazda", "Blue", "3", 21000.0);
    store.rewrite("ABC-123", &updated).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded[0], updated);
    assert_eq!(loaded[1].plate, "DEF-456");
}
