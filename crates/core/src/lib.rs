// crates/core/src/lib.rs
//! Core job-tracking layer for the vidscale upscaling pipeline.
//!
//! Owns the storage layout under a single configurable root, the persisted
//! `JobRecord` shape, and the `JobStore` that creates and reads records.
//! The upscaling worker is a separate process that mutates records directly
//! on disk; this crate defines the contract it must honor.

pub mod error;
pub mod job;
pub mod storage;
pub mod store;

pub use error::*;
pub use job::*;
pub use storage::*;
pub use store::*;
