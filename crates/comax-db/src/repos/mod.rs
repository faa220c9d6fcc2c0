//! Repository modules implementing store operations for all Comax entities.
//!
//! Each module adds methods to `ComaxService` via `impl ComaxService` blocks.

pub mod applications;
pub mod audit;
pub mod languages;
pub mod organizations;
pub mod resources;
