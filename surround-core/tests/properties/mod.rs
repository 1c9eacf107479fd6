//! Property-based tests for the Surround core library

mod config_tests;
mod extension_tests;
mod language_tests;
mod snippet_tests;
