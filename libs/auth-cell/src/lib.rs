pub mod models;
pub mod services;

pub use models::*;
pub use services::authenticator::{Authenticator, DENTIST_USER_ID, STAFF_USER_ID};
