//! Unit tests for the task board module.
//!
//! Tests are organised by component, covering happy paths, silent no-ops
//! and edge cases for the public APIs.

mod support;
