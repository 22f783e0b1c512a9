// listguard/src/lib.rs
//! # listguard CLI
//!
//! Terminal front end for `listguard-core`: reads a listing from stdin or a
//! file, then sanitizes it, analyzes it, or runs the full compliance check.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
