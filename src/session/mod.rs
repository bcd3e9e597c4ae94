pub mod result;
pub mod state;
pub mod ticker;
