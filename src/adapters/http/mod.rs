//! HTTP adapters - REST API implementations.

pub mod execution;

// Re-export key types for convenience
pub use execution::execution_routes;
pub use execution::ExecutionHandlers;
