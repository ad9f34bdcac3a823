mod approvals;
mod attendance;
mod auth;
pub mod client;
mod courses;
mod notifications;
pub mod types;

pub use attendance::RecordQuery;
pub use client::*;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests;
