pub mod api;
pub mod inference;
