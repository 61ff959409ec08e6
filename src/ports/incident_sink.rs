//! Incident sink port.
//!
//! Receiving system for generated incidents. Notification and reporting
//! are downstream concerns; the engine only hands incidents over.

use crate::domain::foundation::DomainError;
use crate::domain::incident::Incident;
use async_trait::async_trait;

/// Write port for generated incidents.
#[async_trait]
pub trait IncidentSink: Send + Sync {
    /// Persist a newly generated incident.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, incident: &Incident) -> Result<(), DomainError>;
}
