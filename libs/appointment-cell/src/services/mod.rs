pub mod availability;
pub mod dashboard;
pub mod lifecycle;
pub mod store;
pub mod wizard;
