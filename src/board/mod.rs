//! Task board: tasks, their steps and decomposition graphs, and the store
//! that keeps conflict scores current.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]
//! - Serialised record shapes in [`adapters`]
//! - Store configuration in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
