pub mod aggregate;
pub mod analyzer;
pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod scheduler;
pub mod store;
