//! Schema resolution and type synthesis for froactful.
//!
//! This crate is the generation engine: it classifies corpus fields into
//! properties, signals, and bindable properties, resolves each class's
//! effective field set across its inheritance chain under the configured
//! inlining policy, filters classes and fields for eligibility and
//! writability, counts shared-ancestor references, and emits the props
//! types, wrapper constructors, and export entries spliced into the
//! module template.
//!
//! The pipeline has one hard sequencing constraint: parse, then filter the
//! eligible classes, then run reference counting to completion, then
//! synthesize. [`Session::generate`] enforces that order.
//!
//! # Examples
//!
//! ```
//! use froactful_codegen::Session;
//! use froactful_core::GenerateConfig;
//! use froactful_schema::{CorpusIndex, SchemaStore};
//!
//! let schema = SchemaStore::parse_json(r#"{
//!     "Version": 1,
//!     "Classes": [
//!         {"Name": "Instance", "Superclass": "<<<ROOT>>>", "Members": []}
//!     ],
//!     "Enums": []
//! }"#).unwrap();
//! let corpus = CorpusIndex::parse("declare class Instance\nend\n");
//!
//! let mut session = Session::new(schema, corpus, GenerateConfig::default());
//! assert!(session.eligible_classes().unwrap().is_empty());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod classify;
pub mod filter;
pub mod refcount;
pub mod session;
pub mod synth;

pub use refcount::ReferenceCounts;
pub use session::Session;
