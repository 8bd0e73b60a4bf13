//! Source-document model for froactful.
//!
//! Two independently maintained documents describe the class hierarchy:
//! - the reflection schema (API dump): JSON listing every class, its
//!   members, tags, and security descriptors — modeled in [`dump`];
//! - the type corpus: Luau declaration text, one `declare class` block per
//!   class — indexed in [`corpus`] and split into fields by [`fields`].
//!
//! The two documents drift: a class or field present in one may be absent
//! from the other. Every lookup in this crate reports such misses as
//! `None`/empty rather than an error; the resolution layer decides what to
//! skip.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod corpus;
mod dump;
mod fields;

pub use corpus::{ClassDecl, CorpusIndex};
pub use dump::{ApiClass, ApiDump, ApiEnum, EnumItem, Member, MemberKind, Security, SchemaStore, ValueType};
pub use fields::{RawField, parse_fields};
