//! Test helpers shared across crates.
//!
//! This crate provides seeded contexts, gadget values with ready-made
//! converters, and conditions that log when they are verified.

pub mod conditions;
pub mod context;
pub mod converters;
