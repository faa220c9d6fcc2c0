//! # comax-core
//!
//! Core types, culture catalogue, and error types for Comax.
//!
//! This crate provides the foundational types shared across all Comax crates:
//! - Stored entities (translation records, audit entries, applications, languages, organizations)
//! - The derived grid row (`LocalizationRow`) and its typed per-culture map
//! - The fixed `CultureCode` catalogue and audit enums
//! - The explicit session context threaded through store calls
//! - Cross-cutting error types
//! - Summary types returned by batch operations

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod responses;
