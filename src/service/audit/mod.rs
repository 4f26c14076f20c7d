//! Staff audit log.
//!
//! `router` decides what each guild event produces, `builder` renders the
//! records.

pub mod builder;
pub mod router;

pub use router::AuditEventRouter;
