pub mod config;
pub mod error;
pub mod refresh;
pub mod routes;
pub mod state;
pub mod tracing_init;
