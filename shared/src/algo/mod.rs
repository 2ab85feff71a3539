//! Generic algorithms used across the workspace.

pub mod parallel;

pub use parallel::generate_seeded_in_parallel;
