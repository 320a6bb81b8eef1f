//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: the in-memory city store
//! - **notification**: the logging mail service
//!
//! Adapters are thin translators between domain types and their backing
//! representation. They contain no business rules.

pub mod notification;
pub mod persistence;
