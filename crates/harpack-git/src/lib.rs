//! Git queries for harpack
//!
//! Only the read-only subset the release pipeline needs: opening a
//! repository, the current branch, and the most recent reachable tag.
//! Nothing here mutates repository state.

pub mod repository;
pub mod tags;

pub use repository::{GitRepo, Result};
