//! PostgreSQL adapters - database implementations of the ports.

mod catalog_store;
mod execution_repository;
mod incident_sink;

pub use catalog_store::PostgresCatalogStore;
pub use execution_repository::PostgresExecutionRepository;
pub use incident_sink::PostgresIncidentSink;
