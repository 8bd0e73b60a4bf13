//! Field classification and type-signature derivation.
//!
//! Raw corpus fields fall into three kinds: plain properties, signals
//! (event slots), and bindable properties (change-observation slots). The
//! predicates and derivations here are standalone pure functions so that
//! adding a further kind is an additive change in the session, not a
//! rewrite of a closed match.

use froactful_core::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Type prefix marking a field as a signal.
pub const SIGNAL_TYPE_PREFIX: &str = "RBXScriptSignal";

/// Raw type names with no cross-language representation; property fields
/// of these types are dropped entirely.
const UNREPRESENTABLE_TYPES: [&str; 2] = ["ProtectedString", "Hole"];

/// Name prefix marking a property as bindable.
const BINDABLE_NAME_PREFIX: &str = "Absolute";
/// The one exact property name that is bindable on every class.
const BINDABLE_EXACT_NAME: &str = "TextBounds";
/// The one (class, property) pair that is bindable by exception.
const BINDABLE_CLASS_EXCEPTION: (&str, &str) = ("ScrollingFrame", "CanvasPosition");

/// Tuple-parameter signal grammar: `RBXScriptSignal<(A, B)>`.
static SIGNAL_TUPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^RBXScriptSignal<\((.*)\)>").expect("tuple signal pattern is valid")
});

/// Bare-parameter signal grammar: `RBXScriptSignal<T>` / `RBXScriptSignal<T...>`.
static SIGNAL_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RBXScriptSignal<(.*)>").expect("bare signal pattern is valid"));

/// A classified field ready for emission: display name and derived type
/// signature. Ordering is by display name, which is what the emitter
/// sorts flattened field lists by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Field {
    /// Display name (`Visible`, `onActivated`, `bindAbsoluteSize`).
    pub name: String,
    /// Derived, optional-widened type signature.
    pub ty: String,
}

impl Field {
    /// Renders the field as a `name: type` record entry.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{}: {}", self.name, self.ty)
    }
}

/// Returns `true` if the raw signature denotes a signal.
#[must_use]
pub fn is_signal(signature: &str) -> bool {
    signature.starts_with(SIGNAL_TYPE_PREFIX)
}

/// Returns `true` if the raw type has no representable equivalent.
#[must_use]
pub fn is_unrepresentable(signature: &str) -> bool {
    UNREPRESENTABLE_TYPES.contains(&signature)
}

/// Returns `true` if the named property supports two-way observation and
/// gets a `bind<Name>` slot.
#[must_use]
pub fn is_bindable(class: &str, field: &str) -> bool {
    field.starts_with(BINDABLE_NAME_PREFIX)
        || field == BINDABLE_EXACT_NAME
        || (class == BINDABLE_CLASS_EXCEPTION.0 && field == BINDABLE_CLASS_EXCEPTION.1)
}

/// Rewrites a raw property type into its cross-language-safe equivalent.
///
/// `Content` carries opaque platform data and collapses to `string`;
/// enum-shaped names become qualified enum references; the two legacy
/// reference types collapse to `any`.
///
/// # Examples
///
/// ```
/// use froactful_codegen::classify::rewrite_property_type;
///
/// assert_eq!(rewrite_property_type("Content"), "string");
/// assert_eq!(rewrite_property_type("EnumFont"), "Enum.Font");
/// assert_eq!(rewrite_property_type("Player"), "any");
/// assert_eq!(rewrite_property_type("Vector2"), "Vector2");
/// ```
#[must_use]
pub fn rewrite_property_type(raw: &str) -> String {
    if raw == "Content" {
        "string".to_string()
    } else if let Some(rest) = raw.strip_prefix("Enum") {
        format!("Enum.{rest}")
    } else if raw == "Team" || raw == "Player" {
        "any".to_string()
    } else {
        raw.to_string()
    }
}

/// Widens a type signature to optional.
///
/// All generated props are write-only best-effort hints, never guaranteed
/// present, so every retained field type ends in `?`.
#[must_use]
pub fn make_optional(ty: &str) -> String {
    if ty.ends_with('?') {
        ty.to_string()
    } else {
        format!("{ty}?")
    }
}

/// Derives the slot type for a signal field.
///
/// The parameter list is extracted from the tuple or bare grammar, each
/// parameter rewritten through the property table, and the result
/// reassembled as a callback whose first parameter is the caller-supplied
/// self type. `inline_body` selects between the inline function form and
/// a reference to the shared `Event` alias; both are optional-widened.
///
/// # Errors
///
/// Returns [`Error::SignalSignature`] when the signature matches neither
/// grammar. This is schema corruption, not drift, and aborts generation.
///
/// # Examples
///
/// ```
/// use froactful_codegen::classify::signal_slot_type;
///
/// let ty = signal_slot_type("Activated", "RBXScriptSignal<(A, B)>", "X", false).unwrap();
/// assert_eq!(ty, "Event<X, A, B>?");
///
/// let ty = signal_slot_type("Activated", "RBXScriptSignal<(A, B)>", "X", true).unwrap();
/// assert_eq!(ty, "(rbx: X, A, B) -> ()?");
/// ```
pub fn signal_slot_type(
    field: &str,
    signature: &str,
    self_type: &str,
    inline_body: bool,
) -> Result<String> {
    let captures = SIGNAL_TUPLE
        .captures(signature)
        .or_else(|| SIGNAL_BARE.captures(signature))
        .ok_or_else(|| Error::SignalSignature {
            field: field.to_string(),
            signature: signature.to_string(),
        })?;

    let inner = captures.get(1).map_or("", |m| m.as_str());
    let mut args = vec![self_type.to_string()];
    args.extend(
        inner
            .split(", ")
            .filter(|part| !part.is_empty())
            .map(rewrite_property_type),
    );
    let args_def = args.join(", ");

    Ok(if inline_body {
        format!("(rbx: {args_def}) -> ()?")
    } else {
        format!("Event<{args_def}>?")
    })
}

/// Derives the slot type for a bindable property: a one-argument callback
/// taking only the self type, optional.
#[must_use]
pub fn bindable_slot_type(self_type: &str) -> String {
    format!("(rbx: {self_type}) -> ()?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_prefix_detection() {
        assert!(is_signal("RBXScriptSignal<()>"));
        assert!(is_signal("RBXScriptSignal<(string)>"));
        assert!(!is_signal("boolean"));
        assert!(!is_signal("Event<Rbx>"));
    }

    #[test]
    fn test_property_rewrite_table() {
        assert_eq!(rewrite_property_type("Content"), "string");
        assert_eq!(rewrite_property_type("EnumFrameStyle"), "Enum.FrameStyle");
        assert_eq!(rewrite_property_type("Team"), "any");
        assert_eq!(rewrite_property_type("Player"), "any");
        assert_eq!(rewrite_property_type("UDim2"), "UDim2");
    }

    #[test]
    fn test_unrepresentable_types() {
        assert!(is_unrepresentable("ProtectedString"));
        assert!(is_unrepresentable("Hole"));
        assert!(!is_unrepresentable("string"));
    }

    #[test]
    fn test_make_optional_is_idempotent() {
        assert_eq!(make_optional("boolean"), "boolean?");
        assert_eq!(make_optional("boolean?"), "boolean?");
    }

    #[test]
    fn test_signal_tuple_grammar_round_trip() {
        let reference = signal_slot_type("S", "RBXScriptSignal<(A, B)>", "X", false).unwrap();
        assert_eq!(reference, "Event<X, A, B>?");

        let inline = signal_slot_type("S", "RBXScriptSignal<(A, B)>", "X", true).unwrap();
        assert_eq!(inline, "(rbx: X, A, B) -> ()?");
    }

    #[test]
    fn test_signal_bare_grammar() {
        let ty = signal_slot_type("Changed", "RBXScriptSignal<string>", "Frame", false).unwrap();
        assert_eq!(ty, "Event<Frame, string>?");
    }

    #[test]
    fn test_signal_empty_tuple() {
        let ty = signal_slot_type("Activated", "RBXScriptSignal<()>", "TextButton", false).unwrap();
        assert_eq!(ty, "Event<TextButton>?");
    }

    #[test]
    fn test_signal_parameters_are_rewritten() {
        let ty = signal_slot_type(
            "PlayerChanged",
            "RBXScriptSignal<(Player, EnumFont)>",
            "X",
            false,
        )
        .unwrap();
        assert_eq!(ty, "Event<X, any, Enum.Font>?");
    }

    #[test]
    fn test_malformed_signal_is_fatal() {
        let err = signal_slot_type("Broken", "RBXScriptSignal", "X", false).unwrap_err();
        assert!(err.is_signal_signature());
    }

    #[test]
    fn test_bindable_heuristics() {
        assert!(is_bindable("Frame", "AbsoluteSize"));
        assert!(is_bindable("TextLabel", "TextBounds"));
        assert!(is_bindable("ScrollingFrame", "CanvasPosition"));
        assert!(!is_bindable("Frame", "CanvasPosition"));
        assert!(!is_bindable("Frame", "Visible"));
    }

    #[test]
    fn test_bindable_slot_type() {
        assert_eq!(bindable_slot_type("Frame"), "(rbx: Frame) -> ()?");
    }

    #[test]
    fn test_field_ordering_is_by_display_name() {
        let mut fields = vec![
            Field {
                name: "onActivated".to_string(),
                ty: "Event<X>?".to_string(),
            },
            Field {
                name: "Size".to_string(),
                ty: "UDim2?".to_string(),
            },
        ];
        fields.sort();
        assert_eq!(fields[0].name, "Size");
        assert_eq!(fields[1].name, "onActivated");
    }
}
