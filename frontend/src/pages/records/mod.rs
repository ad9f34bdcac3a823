pub mod components;
mod panel;
pub mod repository;
pub mod utils;
pub mod view_model;

pub use panel::RecordsPage;
