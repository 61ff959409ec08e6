//! Ports - contracts between the domain and the outside world.
//!
//! The execution engine consumes a catalog store (checklist definitions),
//! an execution repository (durable executions/answers), and an incident
//! sink. Adapters provide the implementations.

mod catalog_store;
mod execution_repository;
mod incident_sink;

pub use catalog_store::CatalogStore;
pub use execution_repository::ExecutionRepository;
pub use incident_sink::IncidentSink;
