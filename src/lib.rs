pub mod core;
pub mod models;
pub mod form;
pub mod query;
pub mod api;
pub mod console;
