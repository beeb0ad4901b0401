//! Wire representations of OME OData payloads
//!
//! The OME REST API speaks OData with PascalCase field names and
//! whitespace-separated timestamps. This module owns those shapes and the
//! mapping into the domain types; nothing outside `dto` should see a raw
//! payload field.

pub mod baseline;
pub mod catalog;
pub mod compliance;
pub mod job;
pub mod odata;
