//! Generation configuration.
//!
//! The original generator steered its behavior through module-level
//! constants; here the same knobs form an explicit value constructed once
//! per run and threaded through the generation session, so two sessions
//! with different policies can never contaminate each other.
//!
//! # Examples
//!
//! ```
//! use froactful_core::GenerateConfig;
//!
//! // Default policy: nothing inlined, UI/world roots included.
//! let config = GenerateConfig::default();
//! assert!(!config.inline_inherited_properties);
//! assert!(config.include_roots.iter().any(|r| r == "GuiBase2d"));
//! ```

use serde::{Deserialize, Serialize};

/// One step of the bisection trace used to narrow the class window.
///
/// When the emitted module breaks the downstream type checker, the trace
/// halves the schema's class list step by step until the offending class
/// is isolated. An empty trace leaves the window covering the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BisectStep {
    /// Keep the upper half of the current window.
    Left,
    /// Keep the lower half of the current window.
    Right,
}

/// Configuration for one generation run.
///
/// Controls which classes are eligible and whether inherited fields are
/// duplicated into each descendant's props type or reached through a shared
/// base-type reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Root categories whose descendants are eligible for generation.
    ///
    /// A class qualifies when its ancestry (itself included) intersects
    /// this list. Including everything can overwhelm the downstream
    /// language server, hence an allow-list instead of "all creatable".
    pub include_roots: Vec<String>,

    /// Classes whose descendants are excluded even when allowed above.
    ///
    /// Exclusion wins over inclusion and is checked unconditionally.
    pub exclude_classes: Vec<String>,

    /// Duplicate ancestor properties into each descendant's props type.
    ///
    /// When `false`, ancestor properties are reached through a reference
    /// to the shared base type instead.
    pub inline_inherited_properties: bool,

    /// Duplicate ancestor signals into each descendant's props type.
    pub inline_inherited_signals: bool,

    /// Duplicate ancestor bindable properties into each descendant's
    /// props type.
    pub inline_inherited_bindables: bool,

    /// Inline the entire props type at the wrapper declaration instead of
    /// referencing a named props type.
    pub inline_entire_type: bool,

    /// Emit signal slots as inline function types rather than references
    /// to the shared `Event` alias.
    pub inline_signal_bodies: bool,

    /// Bisection trace restricting generation to a contiguous window of
    /// the schema's class list. Empty means the full list.
    pub bisect_trace: Vec<BisectStep>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            include_roots: vec![
                "UIBase".to_string(),
                "GuiBase2d".to_string(),
                "BasePart".to_string(),
                "Camera".to_string(),
            ],
            // These classes break the downstream language server, or are
            // too new to be defined in the type corpus yet.
            exclude_classes: vec![
                "Player".to_string(),
                "Team".to_string(),
                "RemoteFunction".to_string(),
                "BinaryStringValue".to_string(),
                "RemoteEvent".to_string(),
                "ProximityPrompt".to_string(),
                "ProximityPromptService".to_string(),
                "CanvasGroup".to_string(),
                "AdGui".to_string(),
            ],
            // luau doesn't properly infer signal parameters when types are
            // not completely inlined, so the reference-based form stays the
            // default and inlining is opt-in.
            inline_inherited_properties: false,
            inline_inherited_signals: false,
            inline_inherited_bindables: false,
            inline_entire_type: false,
            inline_signal_bodies: false,
            bisect_trace: Vec::new(),
        }
    }
}

impl GenerateConfig {
    /// Returns `true` when any self-typed field kind (signals, bindables)
    /// keeps the reference-based form, which forces base types to carry a
    /// self-type parameter.
    #[must_use]
    pub const fn base_types_parameterized(&self) -> bool {
        !self.inline_inherited_signals || !self.inline_inherited_bindables
    }

    /// Computes the `(min, max)` 1-based index window described by the
    /// bisection trace over a class list of `len` entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use froactful_core::{BisectStep, GenerateConfig};
    ///
    /// let mut config = GenerateConfig::default();
    /// assert_eq!(config.bisect_window(100), (0, 100));
    ///
    /// config.bisect_trace = vec![BisectStep::Left];
    /// assert_eq!(config.bisect_window(100), (50, 100));
    ///
    /// config.bisect_trace = vec![BisectStep::Left, BisectStep::Right];
    /// assert_eq!(config.bisect_window(100), (50, 75));
    /// ```
    #[must_use]
    pub fn bisect_window(&self, len: usize) -> (usize, usize) {
        let mut min = 0usize;
        let mut max = len;
        for step in &self.bisect_trace {
            match step {
                // ceil of (max - min) / 2
                BisectStep::Left => min += (max - min).div_ceil(2),
                // floor of (max - min) / 2
                BisectStep::Right => max -= (max - min) / 2,
            }
        }
        (min, max)
    }
}
