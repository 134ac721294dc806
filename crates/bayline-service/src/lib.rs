//! Bayline service - the availability & conflict resolution engine.
//!
//! Converts UTC instants to shop-local calendar positions under the
//! business-hours policy, generates and filters bookable slots, guards
//! create/update flows against double-booking, and resolves inbound
//! customer/vehicle/appointment records before creating duplicates.
//! All state lives at the remote store; everything here is request-scoped.

pub mod calendar;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod interval;
pub mod locator;
pub mod resolver;
pub mod slots;
