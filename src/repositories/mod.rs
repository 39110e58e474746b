//! Repository contract per entity, plus the SeaORM-backed implementations.
//!
//! Handlers depend on the traits only; constraint validation happens before
//! a repository is invoked, so these implementations never reject input.
//! Absence is always `Ok(None)`, never an error.

pub mod difficulty;
pub mod image;
pub mod region;
pub mod walk;

pub use difficulty::{DifficultyRepository, SqlDifficultyRepository};
pub use image::{ImageRepository, NewImage, SqlImageRepository};
pub use region::{RegionRepository, SqlRegionRepository};
pub use walk::{SqlWalkRepository, WalkRepository};
