//! Booking path: double-booking prevention, entity resolution, validation.

use bayline_remote::model::AppointmentStatus;
use bayline_service::engine::BookingRequest;
use bayline_service::error::ServiceError;

use super::helpers::*;

fn request(start: &str) -> BookingRequest {
    BookingRequest {
        name: "John Doe".to_string(),
        phone: "555-123-4567".to_string(),
        vehicle_make: "Toyota".to_string(),
        vehicle_model: "Camry".to_string(),
        vehicle_year: Some(2021),
        start: start.to_string(),
        title: None,
    }
}

#[test_log::test(tokio::test)]
async fn booking_a_taken_slot_is_a_conflict() {
    let (engine, store) = engine();
    let other = store.seed_customer("Jane", "Roe", &["+15559990000"]);
    store.seed_appointment(
        &other.id,
        LOCATION,
        nov(25, 10, 0),
        nov(25, 10, 30),
        AppointmentStatus::Scheduled,
    );

    let err = engine
        .book(&request("2025-11-25T10:15:00Z"), week_before())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[test_log::test(tokio::test)]
async fn back_to_back_booking_succeeds() {
    let (engine, store) = engine();
    let other = store.seed_customer("Jane", "Roe", &["+15559990000"]);
    store.seed_appointment(
        &other.id,
        LOCATION,
        nov(25, 10, 0),
        nov(25, 10, 30),
        AppointmentStatus::Scheduled,
    );

    let outcome = engine
        .book(&request("2025-11-25T10:30:00Z"), week_before())
        .await
        .unwrap();

    assert_eq!(outcome.appointment.start, nov(25, 10, 30));
    assert_eq!(outcome.appointment.end, nov(25, 11, 0));
    assert_eq!(outcome.appointment.status, AppointmentStatus::Scheduled);
}

#[test_log::test(tokio::test)]
async fn canceled_appointment_does_not_block_the_slot() {
    let (engine, store) = engine();
    let other = store.seed_customer("Jane", "Roe", &["+15559990000"]);
    store.seed_appointment(
        &other.id,
        LOCATION,
        nov(25, 10, 0),
        nov(25, 10, 30),
        AppointmentStatus::Canceled,
    );

    assert!(
        engine
            .book(&request("2025-11-25T10:00:00Z"), week_before())
            .await
            .is_ok()
    );
}

#[test_log::test(tokio::test)]
async fn booking_twice_reuses_customer_and_vehicle() {
    let (engine, store) = engine();

    let first = engine
        .book(&request("2025-11-25T15:00:00Z"), week_before())
        .await
        .unwrap();
    let second = engine
        .book(&request("2025-11-26T15:00:00Z"), week_before())
        .await
        .unwrap();

    assert!(first.customer_created);
    assert!(first.vehicle_created);
    assert!(!second.customer_created);
    assert!(!second.vehicle_created);
    assert_eq!(
        first.appointment.customer_id,
        second.appointment.customer_id
    );
    assert_eq!(store.customer_count(), 1);
    assert_eq!(store.vehicle_count(), 1);
}

#[test_log::test(tokio::test)]
async fn phone_format_differences_resolve_to_one_customer() {
    let (engine, store) = engine();

    engine
        .book(&request("2025-11-25T15:00:00Z"), week_before())
        .await
        .unwrap();

    let mut alt = request("2025-11-26T15:00:00Z");
    alt.phone = "1 (555) 123-4567".to_string();
    let outcome = engine.book(&alt, week_before()).await.unwrap();

    assert!(!outcome.customer_created);
    assert_eq!(store.customer_count(), 1);
}

#[test_log::test(tokio::test)]
async fn default_title_names_the_vehicle() {
    let (engine, _store) = engine();

    let outcome = engine
        .book(&request("2025-11-25T15:00:00Z"), week_before())
        .await
        .unwrap();

    assert_eq!(outcome.appointment.title, "Toyota Camry service");
    assert_eq!(outcome.display, "Tue, Nov 25 at 10:00 AM");
}

#[test_log::test(tokio::test)]
async fn unparseable_start_is_rejected_before_any_write() {
    let (engine, store) = engine();

    let err = engine
        .book(&request("not-a-time"), week_before())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(store.customer_count(), 0);
}

#[test_log::test(tokio::test)]
async fn blank_name_is_rejected_before_any_write() {
    let (engine, store) = engine();

    let mut bad = request("2025-11-25T15:00:00Z");
    bad.name = "   ".to_string();
    let err = engine.book(&bad, week_before()).await.unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
    assert_eq!(store.customer_count(), 0);
}

#[test_log::test(tokio::test)]
async fn past_start_is_rejected() {
    let (engine, _store) = engine();

    let err = engine
        .book(&request("2025-11-25T15:00:00Z"), nov(26, 0, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidInput(_)));
}
