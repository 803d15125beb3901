//! Shared building blocks for the portal crates.
//! - Logging bootstrap (`utils::logging`)
//! - Startup environment sanity checks (`env`)
//! - Small wire types shared by every HTTP surface (`types`)

pub mod types;
pub mod utils;
pub mod env;
