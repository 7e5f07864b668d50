// ABOUTME: Library root for asc-deploy - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod artifact;
pub mod config;
pub mod credential;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod locator;
pub mod management;
pub mod output;
pub mod slots;
pub mod types;
