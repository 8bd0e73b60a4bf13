//! Index over the type-corpus document.
//!
//! The corpus is free text with one declaration block per class:
//!
//! ```text
//! declare class Frame extends GuiObject
//!     Style: Enum.FrameStyle
//! end
//! ```
//!
//! Root classes use a bare header with no `extends` clause. The index is
//! built by a single multiline scan at construction; per-class lookups are
//! then plain map reads, so repeated resolution of deep ancestor chains
//! never re-scans the text. A class missing from the corpus is a lookup
//! miss, not an error: the schema and the corpus are maintained separately
//! and drift between them is expected.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Matches one `declare class` block: header (with optional `extends`),
/// contiguous non-empty member lines, and the `end` terminator line.
static CLASS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^declare class (\w+)(?: extends (\w+))?\r?\n((?:.+\n)*?)end$")
        .expect("class block pattern is valid")
});

/// One class declaration extracted from the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    /// Declared superclass, `None` for a bare (root) header.
    pub superclass: Option<String>,
    /// Raw member-declaration lines between the header and `end`.
    pub raw_block: String,
}

/// Name-indexed view of every class declaration in the corpus.
#[derive(Debug)]
pub struct CorpusIndex {
    classes: HashMap<String, ClassDecl>,
}

impl CorpusIndex {
    /// Scans the corpus text and indexes every declaration block.
    ///
    /// # Examples
    ///
    /// ```
    /// use froactful_schema::CorpusIndex;
    ///
    /// let corpus = CorpusIndex::parse("declare class Instance\n\tName: string\nend\n");
    /// assert!(corpus.lookup("Instance").is_some());
    /// assert!(corpus.lookup("Frame").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let classes: HashMap<String, ClassDecl> = CLASS_BLOCK
            .captures_iter(text)
            .map(|cap| {
                let name = cap[1].to_string();
                let decl = ClassDecl {
                    superclass: cap.get(2).map(|m| m.as_str().to_string()),
                    raw_block: cap.get(3).map_or_else(String::new, |m| m.as_str().to_string()),
                };
                (name, decl)
            })
            .collect();
        tracing::debug!(classes = classes.len(), "indexed type corpus");
        Self { classes }
    }

    /// Looks up the declaration for a class name.
    ///
    /// `None` means the class has no corpus entry; callers must treat it as
    /// a leaf with no further ancestry, never as an error.
    #[must_use]
    pub fn lookup(&self, class: &str) -> Option<&ClassDecl> {
        self.classes.get(class)
    }

    /// Returns the declared superclass of a class, if the class is present
    /// and not a root.
    #[must_use]
    pub fn superclass(&self, class: &str) -> Option<&str> {
        self.lookup(class)?.superclass.as_deref()
    }

    /// Returns the raw member block of a class, if present.
    #[must_use]
    pub fn raw_block(&self, class: &str) -> Option<&str> {
        self.lookup(class).map(|decl| decl.raw_block.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "\
declare class Instance\n\
\tName: string\n\
\tChanged: RBXScriptSignal<string>\n\
\tfunction GetChildren(self): { Instance }\n\
end\n\
\n\
declare class GuiObject extends Instance\n\
\tAbsoluteSize: Vector2\n\
\tVisible: boolean\n\
end\n\
\n\
declare class Frame extends GuiObject\n\
\tStyle: EnumFrameStyle\n\
end\n";

    #[test]
    fn test_extends_header() {
        let corpus = CorpusIndex::parse(CORPUS);
        let decl = corpus.lookup("Frame").unwrap();
        assert_eq!(decl.superclass.as_deref(), Some("GuiObject"));
        assert!(decl.raw_block.contains("Style: EnumFrameStyle"));
    }

    #[test]
    fn test_bare_header_is_root() {
        let corpus = CorpusIndex::parse(CORPUS);
        let decl = corpus.lookup("Instance").unwrap();
        assert_eq!(decl.superclass, None);
        assert!(decl.raw_block.contains("Name: string"));
    }

    #[test]
    fn test_missing_class_is_a_miss_not_an_error() {
        let corpus = CorpusIndex::parse(CORPUS);
        assert!(corpus.lookup("TextButton").is_none());
        assert_eq!(corpus.superclass("TextButton"), None);
        assert_eq!(corpus.raw_block("TextButton"), None);
    }

    #[test]
    fn test_block_stops_at_terminator() {
        let corpus = CorpusIndex::parse(CORPUS);
        // The Instance block must not swallow the following classes.
        let block = corpus.raw_block("Instance").unwrap();
        assert!(!block.contains("GuiObject"));
        assert!(!block.contains("Style"));
    }

    #[test]
    fn test_superclass_chain_through_index() {
        let corpus = CorpusIndex::parse(CORPUS);
        assert_eq!(corpus.superclass("Frame"), Some("GuiObject"));
        assert_eq!(corpus.superclass("GuiObject"), Some("Instance"));
        assert_eq!(corpus.superclass("Instance"), None);
    }

    #[test]
    fn test_empty_block() {
        let corpus = CorpusIndex::parse("declare class Empty extends Instance\nend\n");
        let decl = corpus.lookup("Empty").unwrap();
        assert_eq!(decl.raw_block, "");
    }
}
