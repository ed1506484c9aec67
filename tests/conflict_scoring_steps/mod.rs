//! Step definitions for conflict scoring behaviour tests.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
