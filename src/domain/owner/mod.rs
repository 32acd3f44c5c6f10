//! Owner aggregate

pub mod model;

pub use model::{validate_owner_list, Owner, DEFAULT_OWNER_COLOR};
