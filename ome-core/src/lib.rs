//! OME Core
//!
//! Core types for the OpenManage Enterprise firmware management toolkit.
//!
//! This crate contains:
//! - Domain types: Business entities (Catalog, Baseline, Job, compliance reports)
//! - DTOs: Wire representations of the OME OData payloads and the mapping
//!   into domain types

pub mod domain;
pub mod dto;
