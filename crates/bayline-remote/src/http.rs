//! HTTP implementation of [`ShopStore`] against the shop-management backend.
//!
//! JSON in and out; search endpoints wrap their hits in a `{"results": []}`
//! envelope. No retries - a failed call surfaces to the caller.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use bayline_core::config::RemoteConfig;

use crate::error::{RemoteError, RemoteResult};
use crate::model::{
    AppointmentPatch, AppointmentRecord, CustomerRecord, NewAppointment, NewCustomer, NewVehicle,
    TicketRecord, VehicleRecord,
};
use crate::store::{AppointmentQuery, ShopStore};

/// Envelope the backend wraps search results in.
#[derive(Debug, Deserialize)]
struct ResultsEnvelope<T> {
    results: Vec<T>,
}

#[derive(Debug, Clone)]
pub struct HttpShopStore {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl HttpShopStore {
    #[must_use]
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Maps a non-success response to the error taxonomy. Authorization
    /// failures collapse to a generic misconfiguration signal so credential
    /// detail never leaks to the caller.
    async fn check(response: reqwest::Response) -> RemoteResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            tracing::warn!(status = %status, "Shop backend rejected credentials");
            return Err(RemoteError::Misconfigured);
        }

        let message = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound(message));
        }

        tracing::warn!(status = %status, message = %message, "Shop backend error response");
        Err(RemoteError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> RemoteResult<T> {
        tracing::debug!(path, "GET shop backend");
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.config.api_key)
            .query(params)
            .send()
            .await?;
        Ok(Self::check(response).await?.json::<T>().await?)
    }

    async fn post_json<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> RemoteResult<T> {
        tracing::debug!(path, "POST shop backend");
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json::<T>().await?)
    }
}

#[async_trait]
impl ShopStore for HttpShopStore {
    async fn search_appointments(
        &self,
        query: &AppointmentQuery,
    ) -> RemoteResult<Vec<AppointmentRecord>> {
        let mut params = vec![
            ("locationId", query.location_id.clone()),
            ("startsAfter", query.starts_after.to_rfc3339()),
            ("startsBefore", query.starts_before.to_rfc3339()),
            ("excludeCanceled", query.exclude_canceled.to_string()),
        ];
        if let Some(customer_id) = &query.customer_id {
            params.push(("customerId", customer_id.clone()));
        }
        if let Some(page_size) = query.page_size {
            params.push(("pageSize", page_size.to_string()));
        }

        let envelope: ResultsEnvelope<AppointmentRecord> =
            self.get_json("/appointments", &params).await?;
        Ok(envelope.results)
    }

    async fn create_appointment(
        &self,
        fields: &NewAppointment,
    ) -> RemoteResult<AppointmentRecord> {
        self.post_json("/appointments", fields).await
    }

    async fn update_appointment(&self, id: &str, patch: &AppointmentPatch) -> RemoteResult<()> {
        tracing::debug!(id, "PATCH shop backend appointment");
        let response = self
            .client
            .patch(self.url(&format!("/appointments/{id}")))
            .bearer_auth(&self.config.api_key)
            .json(patch)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_appointment(&self, id: &str) -> RemoteResult<()> {
        tracing::debug!(id, "DELETE shop backend appointment");
        let response = self
            .client
            .delete(self.url(&format!("/appointments/{id}")))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn search_customer_by_phone(&self, e164: &str) -> RemoteResult<Option<CustomerRecord>> {
        let envelope: ResultsEnvelope<CustomerRecord> = self
            .get_json("/customers", &[("phone", e164.to_string())])
            .await?;
        Ok(envelope.results.into_iter().next())
    }

    async fn create_customer(&self, fields: &NewCustomer) -> RemoteResult<CustomerRecord> {
        self.post_json("/customers", fields).await
    }

    async fn list_vehicles_for_customer(
        &self,
        customer_id: &str,
    ) -> RemoteResult<Vec<VehicleRecord>> {
        let envelope: ResultsEnvelope<VehicleRecord> = self
            .get_json(&format!("/customers/{customer_id}/vehicles"), &[])
            .await?;
        Ok(envelope.results)
    }

    async fn create_vehicle(&self, fields: &NewVehicle) -> RemoteResult<VehicleRecord> {
        self.post_json("/vehicles", fields).await
    }

    async fn list_open_tickets(&self, customer_id: &str) -> RemoteResult<Vec<TicketRecord>> {
        let envelope: ResultsEnvelope<TicketRecord> = self
            .get_json(
                &format!("/customers/{customer_id}/tickets"),
                &[("status", "open".to_string())],
            )
            .await?;
        Ok(envelope.results)
    }
}
