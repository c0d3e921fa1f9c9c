#![deny(unsafe_code)]
//! Core types and utilities for `idastar`.
//!
//! This crate provides the collaborator contracts, the per-node entry bookkeeping shared by the
//! search engines, and path reconstruction.

mod entry;
mod error;
mod path;
mod pqueue;
mod statistics;
pub mod traits;

pub use crate::entry::*;
pub use crate::error::*;
pub use crate::path::*;
pub use crate::pqueue::*;
pub use crate::statistics::*;
