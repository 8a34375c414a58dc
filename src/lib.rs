// ABOUTME: Library root for winsession — re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod app;
pub mod commands;
pub mod config;
pub mod layout;
pub mod prompt;
pub mod session;
