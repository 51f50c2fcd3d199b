// src/lib.rs
pub mod backend;
pub mod config;
pub mod load_balancer;
pub mod metrics;
pub mod server;
pub mod startup;
