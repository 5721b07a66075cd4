pub mod password;
pub mod registry;
