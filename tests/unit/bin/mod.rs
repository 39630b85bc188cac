//! Executable entry point tests
