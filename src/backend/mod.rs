// src/backend/mod.rs
mod backend;
mod registry;

pub use backend::Backend;
pub use registry::BackendRegistry;
