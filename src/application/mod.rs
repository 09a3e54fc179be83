//! Application layer
//!
//! This layer contains use cases that orchestrate domain logic to implement
//! application-specific workflows. Use cases coordinate the domain service,
//! the store port and the exporter to fulfill one operation each.

pub mod invoice;
