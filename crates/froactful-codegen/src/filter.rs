//! Inclusion and security filtering.
//!
//! The inclusion filter decides which classes participate in generation at
//! all; the security filter decides, per field, whether the generated API
//! may write it. Both resolve schema/corpus drift silently: a class or
//! member missing from either document is excluded, never an error.

use crate::session::Session;
use froactful_core::Result;
use froactful_schema::SchemaStore;
use tracing::{debug, info};

/// Returns `true` if the generated API may write this field.
///
/// Requires a matching member in the schema for that class, no `ReadOnly`
/// tag, and a security descriptor permitting unrestricted external write.
/// A field with no matching member — present in the corpus but absent from
/// the schema — fails the filter (drift tolerance).
#[must_use]
pub fn field_writable(schema: &SchemaStore, class: &str, field: &str) -> bool {
    schema
        .class(class)
        .and_then(|c| c.member(field))
        .is_some_and(|member| !member.is_read_only() && member.security.permits_write())
}

impl Session {
    /// Computes the eligible-class list in schema order.
    ///
    /// A class is eligible iff its corpus superclass resolves, it carries
    /// neither `NotCreatable` nor `Deprecated`, its ancestry intersects the
    /// configured include roots, its ancestry does not intersect the
    /// exclude list (deny wins), and its 1-based position lies inside the
    /// bisection window.
    ///
    /// # Errors
    ///
    /// Propagates [`froactful_core::Error::CyclicInheritance`] from the
    /// ancestry walks.
    pub fn eligible_classes(&mut self) -> Result<Vec<String>> {
        let names: Vec<String> = self.schema().classes().map(|c| c.name.clone()).collect();
        let (min, max) = self.config().bisect_window(names.len());

        let mut eligible = Vec::new();
        for (index, name) in names.iter().enumerate() {
            let position = index + 1;
            if position < min || position > max {
                continue;
            }
            if self.class_eligible(name)? {
                eligible.push(name.clone());
            }
        }
        info!(
            eligible = eligible.len(),
            total = names.len(),
            "filtered eligible classes"
        );
        Ok(eligible)
    }

    fn class_eligible(&mut self, name: &str) -> Result<bool> {
        let tag_blocked = self
            .schema()
            .class(name)
            .is_none_or(|c| c.has_tag("NotCreatable") || c.has_tag("Deprecated"));
        if tag_blocked {
            return Ok(false);
        }

        // A class the corpus doesn't know (or a corpus root) is skipped:
        // its props type would have nothing to anchor to.
        if self.corpus().superclass(name).is_none() {
            debug!(class = name, "no resolvable superclass in corpus, skipping");
            return Ok(false);
        }

        let include_roots = self.config().include_roots.clone();
        let mut included = false;
        for root in &include_roots {
            if self.has_ancestor(name, root)? {
                included = true;
                break;
            }
        }
        if !included {
            return Ok(false);
        }

        // Deny wins over allow.
        let excluded = self.config().exclude_classes.clone();
        for class in &excluded {
            if self.has_ancestor(name, class)? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use froactful_core::{BisectStep, GenerateConfig};
    use froactful_schema::CorpusIndex;
    use serde_json::json;

    fn schema() -> SchemaStore {
        SchemaStore::parse_json(
            &json!({
                "Version": 1,
                "Classes": [
                    {"Name": "Instance", "Superclass": "<<<ROOT>>>", "Members": [
                        {"Name": "Name", "MemberType": "Property",
                         "Security": {"Read": "None", "Write": "None"}},
                        {"Name": "ClassName", "MemberType": "Property",
                         "Security": {"Read": "None", "Write": "None"}, "Tags": ["ReadOnly"]},
                        {"Name": "RobloxLocked", "MemberType": "Property",
                         "Security": "PluginSecurity"}
                    ]},
                    {"Name": "GuiObject", "Superclass": "Instance", "Members": []},
                    {"Name": "Frame", "Superclass": "GuiObject", "Members": []},
                    {"Name": "Legacy", "Superclass": "GuiObject", "Members": [],
                     "Tags": ["Deprecated"]},
                    {"Name": "Service", "Superclass": "Instance", "Members": [],
                     "Tags": ["NotCreatable"]},
                    {"Name": "ProximityPrompt", "Superclass": "GuiObject", "Members": []},
                    {"Name": "Phantom", "Superclass": "GuiObject", "Members": []}
                ],
                "Enums": []
            })
            .to_string(),
        )
        .unwrap()
    }

    fn corpus() -> CorpusIndex {
        CorpusIndex::parse(
            "declare class Instance\n\
             \tName: string\n\
             end\n\
             \n\
             declare class GuiObject extends Instance\n\
             \tVisible: boolean\n\
             end\n\
             \n\
             declare class Frame extends GuiObject\n\
             \tStyle: EnumFrameStyle\n\
             end\n\
             \n\
             declare class Legacy extends GuiObject\n\
             end\n\
             \n\
             declare class Service extends Instance\n\
             end\n\
             \n\
             declare class ProximityPrompt extends GuiObject\n\
             end\n",
        )
    }

    fn config() -> GenerateConfig {
        GenerateConfig {
            include_roots: vec!["GuiObject".to_string()],
            exclude_classes: vec!["ProximityPrompt".to_string()],
            ..GenerateConfig::default()
        }
    }

    #[test]
    fn test_eligibility_basics() {
        let mut session = Session::new(schema(), corpus(), config());
        let eligible = session.eligible_classes().unwrap();
        // GuiObject and Frame qualify; Legacy is Deprecated, Service is
        // NotCreatable (and outside GuiObject anyway), ProximityPrompt is
        // denied, Phantom has no corpus entry, Instance is a corpus root.
        assert_eq!(
            eligible,
            vec!["GuiObject".to_string(), "Frame".to_string()]
        );
    }

    #[test]
    fn test_deny_wins_over_allow() {
        // ProximityPrompt descends from the allowed GuiObject root and is
        // still excluded by the deny list.
        let mut session = Session::new(schema(), corpus(), config());
        let eligible = session.eligible_classes().unwrap();
        assert!(!eligible.contains(&"ProximityPrompt".to_string()));
    }

    #[test]
    fn test_missing_corpus_entry_excludes() {
        let mut session = Session::new(schema(), corpus(), config());
        let eligible = session.eligible_classes().unwrap();
        assert!(!eligible.contains(&"Phantom".to_string()));
    }

    #[test]
    fn test_bisect_window_restricts_positions() {
        let mut cfg = config();
        // 7 classes; one "left" step keeps positions 4..=7.
        cfg.bisect_trace = vec![BisectStep::Left];
        let mut session = Session::new(schema(), corpus(), cfg);
        let eligible = session.eligible_classes().unwrap();
        // GuiObject (position 2) and Frame (position 3) fall outside.
        assert!(eligible.is_empty());
    }

    #[test]
    fn test_security_filter_truth_table() {
        let schema = schema();
        // Writable: member present, not ReadOnly, security None.
        assert!(field_writable(&schema, "Instance", "Name"));
        // ReadOnly excludes regardless of security.
        assert!(!field_writable(&schema, "Instance", "ClassName"));
        // Elevated bare level fails.
        assert!(!field_writable(&schema, "Instance", "RobloxLocked"));
        // No matching member (schema drift) fails.
        assert!(!field_writable(&schema, "Instance", "Ghost"));
        // Unknown class fails.
        assert!(!field_writable(&schema, "NoSuchClass", "Name"));
    }
}
