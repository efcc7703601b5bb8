//! Domain model for the kanban task board.
//!
//! # Responsibility
//! - Define the canonical task record and its wire shape.
//! - Keep presence-check validation next to the data it guards.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - `Status` values are the fixed column identifiers, nothing else.

pub mod task;
