//! Trip-record data model definitions.
//!
//! Column sets, the schema capability descriptor and load planning shared by
//! the ingest, transform and CLI crates.

pub mod capabilities;
pub mod columns;
pub mod plan;

pub use capabilities::SchemaCapabilities;
pub use plan::LoadPlan;
