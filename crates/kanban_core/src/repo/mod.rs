//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate key-value encoding details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce task validation before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   storage transport errors.
//! - Every mutation rewrites the full `tasks` array; there are no partial
//!   or append-only writes.

pub mod prefs_repo;
pub mod task_repo;
