//! Core types for the froactful generator.
//!
//! This crate provides the foundational pieces shared by the schema and
//! codegen crates:
//! - Error hierarchy with contextual information
//! - `Result` alias used across the workspace
//! - The per-run generation configuration object
//!
//! Everything here is deliberately free of I/O: retrieval of the source
//! documents and emission of the generated module live in the CLI crate.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod error;

pub use config::{BisectStep, GenerateConfig};
pub use error::{Error, Result};
