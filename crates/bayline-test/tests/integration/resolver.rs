//! Entity resolution: find-or-create idempotence and fuzzy vehicle matching.

use bayline_service::resolver::{resolve_customer, resolve_vehicle};
use bayline_test::MemoryShopStore;

#[test_log::test(tokio::test)]
async fn customer_resolution_is_idempotent() {
    let store = MemoryShopStore::new();

    let (first, created_first) = resolve_customer(store.as_ref(), "John Doe", "555-123-4567")
        .await
        .unwrap();
    let (second, created_second) = resolve_customer(store.as_ref(), "John Doe", "555-123-4567")
        .await
        .unwrap();

    assert!(created_first);
    assert!(!created_second);
    assert_eq!(first.id, second.id);
    assert_eq!(store.customer_count(), 1);
}

#[test_log::test(tokio::test)]
async fn customer_name_splits_first_and_last() {
    let store = MemoryShopStore::new();

    let (customer, _) = resolve_customer(store.as_ref(), "Mary Anne Smith", "555-123-4567")
        .await
        .unwrap();

    assert_eq!(customer.first_name, "Mary");
    assert_eq!(customer.last_name, "Anne Smith");
    assert_eq!(customer.phone_numbers, vec!["+15551234567".to_string()]);
}

#[test_log::test(tokio::test)]
async fn vehicle_resolution_tolerates_small_misspellings() {
    let store = MemoryShopStore::new();
    let (customer, _) = resolve_customer(store.as_ref(), "John Doe", "555-123-4567")
        .await
        .unwrap();

    let (first, created_first) =
        resolve_vehicle(store.as_ref(), &customer.id, "Toyota", "Camry", None)
            .await
            .unwrap();
    // One edit away, still the same car
    let (second, created_second) =
        resolve_vehicle(store.as_ref(), &customer.id, "Toyota", "Camary", None)
            .await
            .unwrap();

    assert!(created_first);
    assert!(!created_second);
    assert_eq!(first.id, second.id);
    assert_eq!(first.size.as_deref(), Some("standard"));
}

#[test_log::test(tokio::test)]
async fn different_vehicle_creates_a_second_record() {
    let store = MemoryShopStore::new();
    let (customer, _) = resolve_customer(store.as_ref(), "John Doe", "555-123-4567")
        .await
        .unwrap();

    resolve_vehicle(store.as_ref(), &customer.id, "Toyota", "Camry", None)
        .await
        .unwrap();
    let (_, created) = resolve_vehicle(store.as_ref(), &customer.id, "Kia", "Soul", None)
        .await
        .unwrap();

    assert!(created);
    assert_eq!(store.vehicle_count(), 2);
}

#[test_log::test(tokio::test)]
async fn year_mismatch_creates_a_second_record() {
    let store = MemoryShopStore::new();
    let (customer, _) = resolve_customer(store.as_ref(), "John Doe", "555-123-4567")
        .await
        .unwrap();

    resolve_vehicle(store.as_ref(), &customer.id, "Honda", "Civic", Some(2021))
        .await
        .unwrap();
    let (_, created) = resolve_vehicle(store.as_ref(), &customer.id, "Honda", "Civic", Some(2018))
        .await
        .unwrap();

    assert!(created);
    assert_eq!(store.vehicle_count(), 2);
}

#[test_log::test(tokio::test)]
async fn vehicles_are_scoped_per_customer() {
    let store = MemoryShopStore::new();
    let (john, _) = resolve_customer(store.as_ref(), "John Doe", "555-123-4567")
        .await
        .unwrap();
    let (jane, _) = resolve_customer(store.as_ref(), "Jane Roe", "555-999-0000")
        .await
        .unwrap();

    resolve_vehicle(store.as_ref(), &john.id, "Toyota", "Camry", None)
        .await
        .unwrap();
    let (_, created) = resolve_vehicle(store.as_ref(), &jane.id, "Toyota", "Camry", None)
        .await
        .unwrap();

    // Same make/model under a different customer is a different vehicle
    assert!(created);
}
