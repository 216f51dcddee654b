//! Application workflow: status store, engine and the apply/status endpoints.

pub mod engine;
pub mod handlers;
pub mod store;
