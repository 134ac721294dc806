//! Idempotent find-or-create resolution for customers and vehicles.
//!
//! Customers are keyed by canonical phone number, vehicles per-customer by
//! fuzzy (make, model) with an exact year tiebreak. Find-then-create has no
//! transactional guard: two resolvers racing on the same phone can both
//! create. Known limitation, deliberately not papered over with client-side
//! locking; a unique constraint at the store is the backstop.

use bayline_core::util::fuzzy::is_fuzzy_match;
use bayline_core::util::phone::normalize_phone;
use bayline_remote::model::{CustomerRecord, NewCustomer, NewVehicle, VehicleRecord};
use bayline_remote::store::ShopStore;

use crate::error::ServiceResult;

/// Size classification a vehicle is created with when the caller supplies
/// none. The backend uses it for bay assignment.
const DEFAULT_VEHICLE_SIZE: &str = "standard";

/// Splits a free-text name at the first whitespace run: first token is the
/// first name, the remainder is the last name (possibly empty).
fn split_name(name: &str) -> (String, String) {
    let trimmed = name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim_start().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

/// ## Summary
/// Finds the customer keyed by a phone number, creating one if absent.
///
/// The phone is normalized before lookup so superficially different
/// representations of the same number resolve to the same customer. Returns
/// the record plus whether it was created on this call.
///
/// ## Side Effects
/// May create a customer at the remote store.
///
/// ## Errors
/// Propagates remote faults unchanged.
#[tracing::instrument(skip(store, name))]
pub async fn resolve_customer(
    store: &dyn ShopStore,
    name: &str,
    phone: &str,
) -> ServiceResult<(CustomerRecord, bool)> {
    let e164 = normalize_phone(phone);

    if let Some(existing) = store.search_customer_by_phone(&e164).await? {
        tracing::debug!(customer_id = %existing.id, "Customer found by phone");
        return Ok((existing, false));
    }

    let (first_name, last_name) = split_name(name);
    let created = store
        .create_customer(&NewCustomer {
            first_name,
            last_name,
            phone_numbers: vec![e164],
        })
        .await?;

    tracing::debug!(customer_id = %created.id, "Customer created");
    Ok((created, true))
}

/// Whether an existing vehicle matches the requested one. Make and model are
/// fuzzy-compared per-field; year must match exactly when supplied on both
/// sides.
fn vehicle_matches(existing: &VehicleRecord, make: &str, model: &str, year: Option<i32>) -> bool {
    if !is_fuzzy_match(&existing.make, make) || !is_fuzzy_match(&existing.model, model) {
        return false;
    }
    match (existing.year, year) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// ## Summary
/// Finds a customer's vehicle by fuzzy (make, model), creating one if no
/// existing vehicle matches.
///
/// ## Side Effects
/// May create a vehicle at the remote store, with the default size
/// classification.
///
/// ## Errors
/// Propagates remote faults unchanged.
#[tracing::instrument(skip(store))]
pub async fn resolve_vehicle(
    store: &dyn ShopStore,
    customer_id: &str,
    make: &str,
    model: &str,
    year: Option<i32>,
) -> ServiceResult<(VehicleRecord, bool)> {
    let owned = store.list_vehicles_for_customer(customer_id).await?;

    if let Some(existing) = owned
        .into_iter()
        .find(|vehicle| vehicle_matches(vehicle, make, model, year))
    {
        tracing::debug!(vehicle_id = %existing.id, "Vehicle matched existing record");
        return Ok((existing, false));
    }

    let created = store
        .create_vehicle(&NewVehicle {
            customer_id: customer_id.to_string(),
            make: make.trim().to_string(),
            model: model.trim().to_string(),
            year,
            size: DEFAULT_VEHICLE_SIZE.to_string(),
        })
        .await?;

    tracing::debug!(vehicle_id = %created.id, "Vehicle created");
    Ok((created, true))
}
