//! Core types for toolforge: option catalogs, lookup tables, field schemas and form state.
//!
//! Provides the static reference data model ([`catalog::OptionCatalog`],
//! [`table::LookupTable`]), per-tool field schemas ([`schema::ToolSchema`]), the
//! form state holder ([`form::FormState`]), request snapshots and configuration.

pub mod catalog;
pub mod config;
pub mod form;
pub mod request;
pub mod schema;
pub mod table;
