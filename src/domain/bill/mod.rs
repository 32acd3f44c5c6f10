//! Bill aggregate

pub mod model;

pub use model::{Bill, BillPeriod, ReadingRefs};
