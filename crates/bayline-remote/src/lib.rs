//! Bayline remote - the shop-management backend collaborator.
//!
//! Record projections, the [`store::ShopStore`] trait the engine is written
//! against, and the HTTP implementation backed by the real backend. The
//! remote store is the single source of truth; nothing here is persisted
//! locally.

pub mod error;
pub mod http;
pub mod model;
pub mod store;
