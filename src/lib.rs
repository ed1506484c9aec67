//! Breakdown: a personal task board that splits work into steps and
//! warns when a day is overcommitted.
//!
//! # Architecture
//!
//! The board follows hexagonal architecture principles:
//!
//! - **Domain**: tasks, steps, subtask graphs and the capacity model, with
//!   no infrastructure dependencies
//! - **Services**: the task store, conflict scoring, graph history and the
//!   debounced recompute
//! - **Adapters**: the serialised record form used by durability layers
//!
//! # Modules
//!
//! - [`board`]: task store, derived views and subtask graph editing

pub mod board;
