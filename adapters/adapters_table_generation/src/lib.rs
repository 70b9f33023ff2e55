//! Adapters Layer: Table Generation
//!
//! Builds the synthetic block tables the deallocation policies consume.
//! Fixed-partition tables space their addresses evenly across the configured
//! address range; dynamic-partition tables draw distinct random addresses and
//! seed the status pattern a given policy demonstrates.
//!
//! The random source is injected by the caller as a seedable generator, so
//! every table is reproducible from its seed. Configuration is validated
//! before anything is generated.

pub mod generate;

pub use generate::{generate_dynamic_table, generate_fixed_table, CasePreset};
