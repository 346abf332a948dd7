//
// mod.rs
// Toolsuite-rs
//
// The remove-background tool: argument schema, validation/run entry, count matrix I/O, and ambient estimation.
//
// Thales Matheus Mendonça Santos - November 2025

pub mod ambient;
pub mod argparser;
pub mod cli;
pub mod matrix;
