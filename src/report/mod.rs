pub mod indicators;
pub mod summary;
