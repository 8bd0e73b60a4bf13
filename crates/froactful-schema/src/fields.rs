//! Field parser for raw corpus declaration blocks.

/// One `name: typeSignature` line extracted from a declaration block.
///
/// Names are unique within a class's own block; the same name reappearing
/// in an ancestor's block is expected and resolved downstream by
/// shadowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// Field name as declared.
    pub name: String,
    /// Raw type signature text after the `": "` delimiter.
    pub signature: String,
}

/// Splits a raw declaration block into its field lines.
///
/// Method-like lines (starting with the `function` keyword) are discarded.
/// Each remaining line splits into name and type signature on the first
/// `": "`; lines without the delimiter are corpus drift and are skipped.
/// Output order follows the block; consumers sort when they need a stable
/// order.
///
/// # Examples
///
/// ```
/// use froactful_schema::parse_fields;
///
/// let block = "\tVisible: boolean\n\tfunction TweenPosition(self): boolean\n";
/// let fields = parse_fields(block);
/// assert_eq!(fields.len(), 1);
/// assert_eq!(fields[0].name, "Visible");
/// assert_eq!(fields[0].signature, "boolean");
/// ```
#[must_use]
pub fn parse_fields(block: &str) -> Vec<RawField> {
    block
        .lines()
        .filter_map(|line| {
            let line = line.trim_start();
            if line.starts_with("function") {
                return None;
            }
            let (name, signature) = line.split_once(": ")?;
            Some(RawField {
                name: name.to_string(),
                signature: signature.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_function_lines() {
        let block = "\tName: string\n\tfunction Clone(self): Instance\n\tParent: Instance\n";
        let fields = parse_fields(block);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Name");
        assert_eq!(fields[1].name, "Parent");
    }

    #[test]
    fn test_splits_on_first_delimiter_only() {
        let block = "\tChanged: RBXScriptSignal<(string, Instance)>\n";
        let fields = parse_fields(block);
        assert_eq!(fields[0].name, "Changed");
        assert_eq!(fields[0].signature, "RBXScriptSignal<(string, Instance)>");
    }

    #[test]
    fn test_generic_signature_with_inner_delimiter() {
        let block = "\tAttributeChanged: RBXScriptSignal<(attribute: string)>\n";
        let fields = parse_fields(block);
        assert_eq!(fields[0].name, "AttributeChanged");
        assert_eq!(fields[0].signature, "RBXScriptSignal<(attribute: string)>");
    }

    #[test]
    fn test_delimiterless_lines_are_drift() {
        let block = "\tVisible: boolean\n\t@deprecated\n\n";
        let fields = parse_fields(block);
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_empty_block() {
        assert!(parse_fields("").is_empty());
    }
}
