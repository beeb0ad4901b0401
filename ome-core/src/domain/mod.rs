//! Core domain types
//!
//! This module contains the domain structures shared across the toolkit.
//! These types represent OME entities as the client, monitor, and CLI see
//! them, independent of the OData wire format.

pub mod baseline;
pub mod catalog;
pub mod compliance;
pub mod job;
pub mod target;
