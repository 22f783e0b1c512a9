// listguard-core/src/engines/mod.rs
//! Concrete `ComplianceEngine` implementations.
//!
//! Each engine lives in its own file and implements the
//! `ComplianceEngine` trait.

pub mod regex_engine;
