//! # Utility Split
//!
//! Splits a shared electricity bill among co-owners. Variable costs follow
//! each owner's metered consumption between two readings; fixed costs are
//! shared equally.
//!
//! ## Architecture
//!
//! - **domain**: Owners, meter readings, bills and calculation records
//! - **application**: Allocation engine, statistics and `AllocationService`
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Service lifecycle and tracing setup
//! - **shared**: Errors, validation helpers and shutdown signalling

pub mod application;
pub mod config;
pub mod domain;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export the engine entry points
pub use application::{allocate, allocate_with_policy, AllocationService};

// Re-export API router
pub use interfaces::http::create_api_router;
