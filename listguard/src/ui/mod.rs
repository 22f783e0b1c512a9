// listguard/src/ui/mod.rs
pub mod diff_viewer;
pub mod output_format;
pub mod report_table;
pub mod theme;
