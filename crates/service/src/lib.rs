//! Service layer for the portal.
//! - `pagination`: canonical query normalization, page windows, navigation.
//! - `api`: typed access to the remote REST API (providers, email activity).

pub mod errors;
pub mod pagination;
pub mod api;
