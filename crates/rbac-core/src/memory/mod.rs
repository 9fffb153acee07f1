//! In-memory adapters for tests and local development.

mod audit_trail;
mod store;

pub use audit_trail::{InMemoryAuditTrail, TracingAuditTrailSink};
pub use store::{InMemoryUnitOfWork, Seed};
