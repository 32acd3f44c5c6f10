pub mod analytics;
pub mod calculations;
pub mod health;
pub mod metrics;
pub mod request_id;
