//! Rule compilation for the listguard engines.
//!
//! `compiler` turns the YAML-level `GuardConfig` into regexes ordered by
//! category priority, together with the normalized replacement table.

pub mod compiler;
