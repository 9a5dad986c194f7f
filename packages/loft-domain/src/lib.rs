//! Pure, I/O-free rules shared by the Loft retrieval pipeline.

pub mod privacy;
pub mod query;
