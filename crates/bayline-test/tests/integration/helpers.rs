#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]
//! Test helpers for integration tests.
//!
//! Builds an engine over a shared [`MemoryShopStore`] with the default
//! business-hours policy (Mon-Fri 08:00-17:30, Sat 08:00-12:00 with a 24h
//! lead rule, Sun closed) anchored to America/New_York.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use bayline_core::config::{LoggingConfig, RemoteConfig, Settings, ShopConfig};
use bayline_service::engine::Engine;
use bayline_test::MemoryShopStore;

pub const LOCATION: &str = "loc-1";

pub fn settings() -> Settings {
    Settings {
        remote: RemoteConfig {
            base_url: "http://shop.invalid".to_string(),
            api_key: "test-key".to_string(),
            location_id: LOCATION.to_string(),
        },
        shop: ShopConfig {
            timezone: "America/New_York".to_string(),
            appointment_minutes: 30,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    }
}

/// An engine plus the fake store behind it.
pub fn engine() -> (Engine, Arc<MemoryShopStore>) {
    let store = MemoryShopStore::new();
    let engine = Engine::from_settings(store.clone(), &settings())
        .expect("engine builds from test settings");
    (engine, store)
}

/// A November 2025 instant; the 25th is a Tuesday, the 29th a Saturday.
pub fn nov(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 11, day, hour, minute, 0).unwrap()
}

pub fn iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339()
}

/// A "now" safely before the November test week.
pub fn week_before() -> DateTime<Utc> {
    nov(18, 12, 0)
}
