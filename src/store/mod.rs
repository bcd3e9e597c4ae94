pub mod json_store;
pub mod ranking;
pub mod schema;
