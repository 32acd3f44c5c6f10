//! Meter reading aggregate

pub mod model;

pub use model::MeterReading;
