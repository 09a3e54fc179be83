//! Cotizador: invoicing service for an engineering design practice.
//!
//! The crate follows a hexagonal layout:
//! - [`domain`] holds the invoice model, pricing, validation and the
//!   store/exporter ports
//! - [`application`] wraps the domain service in one use case per operation
//! - [`adapters`] exposes the HTTP API
//! - [`infrastructure`] provides configuration, the store implementations
//!   and the CSV exporter

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
