//! Availability queries: business hours, existing bookings, lead-time rule.

use bayline_remote::model::AppointmentStatus;
use bayline_service::engine::{AvailabilityQuery, SlotWindow};

use super::helpers::*;

fn day_query(reference: &str) -> AvailabilityQuery {
    AvailabilityQuery {
        window: SlotWindow::Day {
            reference: reference.to_string(),
        },
        duration_minutes: None,
    }
}

#[test_log::test(tokio::test)]
async fn tuesday_has_full_day_of_slots() {
    let (engine, _store) = engine();

    let slots = engine
        .availability(&day_query("2025-11-25T15:00:00Z"), week_before())
        .await
        .unwrap();

    // 08:00 through 17:00 EST inclusive, every half hour
    assert_eq!(slots.len(), 19);
    assert_eq!(slots.first().unwrap().start, nov(25, 13, 0));
    assert_eq!(slots.last().unwrap().start, nov(25, 22, 0));
}

#[test_log::test(tokio::test)]
async fn closed_sunday_yields_no_slots() {
    let (engine, _store) = engine();

    let slots = engine
        .availability(&day_query("2025-11-23T15:00:00Z"), week_before())
        .await
        .unwrap();

    assert!(slots.is_empty());
}

#[test_log::test(tokio::test)]
async fn booked_slot_is_withheld() {
    let (engine, store) = engine();
    let customer = store.seed_customer("Jane", "Doe", &["+15551230000"]);
    store.seed_appointment(
        &customer.id,
        LOCATION,
        nov(25, 15, 0),
        nov(25, 15, 30),
        AppointmentStatus::Scheduled,
    );

    let slots = engine
        .availability(&day_query("2025-11-25T15:00:00Z"), week_before())
        .await
        .unwrap();

    assert_eq!(slots.len(), 18);
    assert!(slots.iter().all(|s| s.start != nov(25, 15, 0)));
}

#[test_log::test(tokio::test)]
async fn canceled_booking_does_not_withhold_slots() {
    let (engine, store) = engine();
    let customer = store.seed_customer("Jane", "Doe", &["+15551230000"]);
    store.seed_appointment(
        &customer.id,
        LOCATION,
        nov(25, 15, 0),
        nov(25, 15, 30),
        AppointmentStatus::Canceled,
    );

    let slots = engine
        .availability(&day_query("2025-11-25T15:00:00Z"), week_before())
        .await
        .unwrap();

    assert_eq!(slots.len(), 19);
}

#[test_log::test(tokio::test)]
async fn range_mode_honors_window_bounds() {
    let (engine, _store) = engine();

    let slots = engine
        .availability(
            &AvailabilityQuery {
                window: SlotWindow::Range {
                    start: iso(nov(25, 15, 0)),
                    end: iso(nov(25, 17, 0)),
                },
                duration_minutes: Some(60),
            },
            week_before(),
        )
        .await
        .unwrap();

    let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
    assert_eq!(
        starts,
        vec![nov(25, 15, 0), nov(25, 15, 30), nov(25, 16, 0), nov(25, 16, 30)]
    );
}

#[test_log::test(tokio::test)]
async fn saturday_lead_time_blocks_same_day_slots() {
    let (engine, _store) = engine();

    // Asking on Saturday morning for Saturday: everything is within 24h
    let same_day = engine
        .availability(&day_query("2025-11-29T15:00:00Z"), nov(29, 12, 0))
        .await
        .unwrap();
    assert!(same_day.is_empty());

    // Asking on Thursday for Saturday: the morning is bookable
    let ahead = engine
        .availability(&day_query("2025-11-29T15:00:00Z"), nov(27, 12, 0))
        .await
        .unwrap();
    assert_eq!(ahead.len(), 8);
}

#[test_log::test(tokio::test)]
async fn every_slot_renders_its_shop_local_time() {
    let (engine, _store) = engine();

    let slots = engine
        .availability(&day_query("2025-11-25T15:00:00Z"), week_before())
        .await
        .unwrap();

    assert_eq!(slots.first().unwrap().display, "Tue, Nov 25 at 8:00 AM");
    assert_eq!(slots.last().unwrap().display, "Tue, Nov 25 at 5:00 PM");
}

#[test_log::test(tokio::test)]
async fn bad_reference_instant_is_invalid_input() {
    let (engine, _store) = engine();

    let err = engine
        .availability(&day_query("next tuesday"), week_before())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        bayline_service::error::ServiceError::InvalidInput(_)
    ));
}
