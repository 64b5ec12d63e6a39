// ABOUTME: Library root for konvoy - exposes the conversion pipeline for testing.
// ABOUTME: The main binary is in main.rs.

pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod model;
pub mod options;
pub mod output;
pub mod serializer;
pub mod transformer;
