//! Error types for froactful generation.
//!
//! Drift between the two source documents (a class present in one but not
//! the other) is never an error: it is resolved locally as an `Option` or a
//! skip. The variants here cover the conditions the pipeline cannot paper
//! over — corrupted signal signatures, cyclic ancestry, and a template that
//! lost one of its splice markers. Generation is all-or-nothing: any of
//! these aborts the run with no partial output.
//!
//! # Examples
//!
//! ```
//! use froactful_core::Error;
//!
//! let err = Error::SignalSignature {
//!     field: "Activated".to_string(),
//!     signature: "RBXScriptSignal".to_string(),
//! };
//! assert!(err.is_signal_signature());
//! ```

use thiserror::Error;

/// Main error type for froactful generation.
#[derive(Error, Debug)]
pub enum Error {
    /// A signal-typed field whose type text matches neither accepted
    /// grammar (tuple or bare parameter form).
    ///
    /// This indicates schema/corpus corruption too severe to skip, so
    /// generation aborts rather than emitting a module with a missing
    /// event slot.
    #[error("couldn't match signal signature `{signature}` on field `{field}`")]
    SignalSignature {
        /// Name of the offending field
        field: String,
        /// The raw type signature that failed to parse
        signature: String,
    },

    /// A class's ancestor chain revisits a class it already passed through.
    ///
    /// The schema is expected to be a forest; a cycle would otherwise send
    /// the resolver into unbounded recursion, so it is rejected eagerly.
    #[error("cyclic inheritance detected at class `{class}`")]
    CyclicInheritance {
        /// The class at which the cycle was detected
        class: String,
    },

    /// The template document is missing one of its literal splice markers.
    ///
    /// Without the marker the substitution would silently drop a whole
    /// output section, so a missing marker fails the run instead.
    #[error("template is missing the `{marker}` marker")]
    TemplateMarker {
        /// The marker text that was not found
        marker: String,
    },

    /// The reflection schema document failed to deserialize.
    #[error("failed to parse the API dump document")]
    SchemaParse {
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Returns `true` if this is a signal-signature corruption error.
    ///
    /// # Examples
    ///
    /// ```
    /// use froactful_core::Error;
    ///
    /// let err = Error::SignalSignature {
    ///     field: "Changed".to_string(),
    ///     signature: "garbage".to_string(),
    /// };
    /// assert!(err.is_signal_signature());
    /// assert!(!err.is_cyclic_inheritance());
    /// ```
    #[must_use]
    pub const fn is_signal_signature(&self) -> bool {
        matches!(self, Self::SignalSignature { .. })
    }

    /// Returns `true` if this is a cyclic-inheritance error.
    #[must_use]
    pub const fn is_cyclic_inheritance(&self) -> bool {
        matches!(self, Self::CyclicInheritance { .. })
    }

    /// Returns `true` if this is a missing-template-marker error.
    #[must_use]
    pub const fn is_template_marker(&self) -> bool {
        matches!(self, Self::TemplateMarker { .. })
    }
}

/// Result type alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
