//! Serde model of the reflection schema document (API dump).
//!
//! The dump is consumed read-only: froactful never mutates or re-emits it,
//! so the model keeps only the fields the filters need (names, superclass,
//! member kind, tags, security) plus the enum listing. Unknown JSON keys
//! are ignored.
//!
//! # Examples
//!
//! ```
//! use froactful_schema::SchemaStore;
//!
//! let store = SchemaStore::parse_json(r#"{
//!     "Version": 1,
//!     "Classes": [
//!         {"Name": "Instance", "Superclass": "<<<ROOT>>>", "Members": []}
//!     ],
//!     "Enums": []
//! }"#).unwrap();
//!
//! let class = store.class("Instance").unwrap();
//! assert!(class.superclass().is_none());
//! ```

use froactful_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel superclass value the dump uses for root classes.
const ROOT_SENTINEL: &str = "<<<ROOT>>>";

/// The reflection schema document: every class and enum the platform
/// exposes, as one JSON snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiDump {
    /// Dump format version.
    #[serde(default)]
    pub version: u64,
    /// All classes, in the dump's declaration order. Generation output
    /// follows this order, so it is preserved as-is.
    pub classes: Vec<ApiClass>,
    /// All enums with their items.
    #[serde(default)]
    pub enums: Vec<ApiEnum>,
}

/// One class entry of the dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiClass {
    /// Class name, unique within the dump.
    pub name: String,
    /// Declared superclass; the root carries a sentinel value, use
    /// [`ApiClass::superclass`] instead of reading this directly.
    pub superclass: String,
    /// Ordered member roster.
    #[serde(default)]
    pub members: Vec<Member>,
    /// Class-level tags such as `NotCreatable` or `Deprecated`.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ApiClass {
    /// Returns the superclass name, or `None` for a root class.
    #[must_use]
    pub fn superclass(&self) -> Option<&str> {
        (self.superclass != ROOT_SENTINEL).then_some(self.superclass.as_str())
    }

    /// Looks up a member by name.
    ///
    /// Members are a short roster per class; a linear scan keeps the model
    /// free of secondary indexes.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Returns `true` if the class carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Kind discriminator of a class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    /// A settable/readable value slot.
    Property,
    /// A callable method.
    Function,
    /// A subscribable event.
    Event,
    /// A host-invoked callback slot.
    Callback,
}

/// One member of a class.
///
/// The member roster is used only for filtering decisions (writability);
/// the textual type of a field always comes from the type corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Member {
    /// Member name, unique within the class.
    pub name: String,
    /// Member kind.
    pub member_type: MemberKind,
    /// Security descriptor; shape varies by member kind, see [`Security`].
    pub security: Security,
    /// Member-level tags such as `ReadOnly`.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Declared value type, where the dump provides one.
    #[serde(default)]
    pub value_type: Option<ValueType>,
}

impl Member {
    /// Returns `true` if the member is tagged read-only.
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.tags.iter().any(|t| t == "ReadOnly")
    }
}

/// Security descriptor of a member.
///
/// Properties carry distinct read/write levels; events, functions, and
/// callbacks carry a single bare level string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Security {
    /// Distinct read and write levels (property members).
    #[serde(rename_all = "PascalCase")]
    Scoped {
        /// Level required to read the member.
        read: String,
        /// Level required to write the member.
        write: String,
    },
    /// A single level covering all access.
    Level(String),
}

impl Security {
    /// Returns `true` if the member can be written without any elevated
    /// security context.
    ///
    /// An explicit `"None"` level passes; every other named level fails.
    /// Scoped security passes only when the write level is `"None"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use froactful_schema::Security;
    ///
    /// assert!(Security::Level("None".to_string()).permits_write());
    /// assert!(!Security::Level("PluginSecurity".to_string()).permits_write());
    /// ```
    #[must_use]
    pub fn permits_write(&self) -> bool {
        match self {
            Self::Level(level) => level == "None",
            Self::Scoped { write, .. } => write == "None",
        }
    }
}

/// Declared value type of a property member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValueType {
    /// Type name as the dump spells it.
    pub name: String,
    /// Type category (`Primitive`, `Class`, `DataType`, `Enum`, `Group`).
    pub category: String,
}

/// One enum entry of the dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiEnum {
    /// Enum name.
    pub name: String,
    /// Enum items in declaration order.
    #[serde(default)]
    pub items: Vec<EnumItem>,
}

/// One item of an enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnumItem {
    /// Item name.
    pub name: String,
    /// Numeric item value.
    pub value: i64,
}

/// Immutable store over a parsed [`ApiDump`] with an O(1) class index.
///
/// This is the only schema surface the resolution layer sees. Lifetime is
/// one generation run; the store is never mutated after construction.
#[derive(Debug)]
pub struct SchemaStore {
    dump: ApiDump,
    index: HashMap<String, usize>,
}

impl SchemaStore {
    /// Builds a store from an already-parsed dump.
    #[must_use]
    pub fn new(dump: ApiDump) -> Self {
        let index = dump
            .classes
            .iter()
            .enumerate()
            .map(|(i, class)| (class.name.clone(), i))
            .collect();
        Self { dump, index }
    }

    /// Parses the schema document text and builds a store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaParse`] if the document is not a valid dump.
    pub fn parse_json(text: &str) -> Result<Self> {
        let dump: ApiDump =
            serde_json::from_str(text).map_err(|source| Error::SchemaParse { source })?;
        tracing::debug!(
            classes = dump.classes.len(),
            enums = dump.enums.len(),
            "parsed API dump"
        );
        Ok(Self::new(dump))
    }

    /// Looks up a class by name.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ApiClass> {
        self.index.get(name).map(|&i| &self.dump.classes[i])
    }

    /// All classes in dump order.
    pub fn classes(&self) -> impl ExactSizeIterator<Item = &ApiClass> {
        self.dump.classes.iter()
    }

    /// All enums in dump order.
    pub fn enums(&self) -> impl ExactSizeIterator<Item = &ApiEnum> {
        self.dump.enums.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_dump() -> ApiDump {
        serde_json::from_value(json!({
            "Version": 1,
            "Classes": [
                {
                    "Name": "Instance",
                    "Superclass": "<<<ROOT>>>",
                    "Members": [
                        {
                            "Name": "Name",
                            "MemberType": "Property",
                            "Security": {"Read": "None", "Write": "None"},
                            "ValueType": {"Name": "string", "Category": "Primitive"}
                        },
                        {
                            "Name": "ClassName",
                            "MemberType": "Property",
                            "Security": {"Read": "None", "Write": "None"},
                            "Tags": ["ReadOnly"],
                            "ValueType": {"Name": "string", "Category": "Primitive"}
                        },
                        {
                            "Name": "Changed",
                            "MemberType": "Event",
                            "Security": "None"
                        }
                    ]
                },
                {
                    "Name": "BasePart",
                    "Superclass": "Instance",
                    "Tags": ["NotCreatable"],
                    "Members": []
                }
            ],
            "Enums": [
                {"Name": "Font", "Items": [{"Name": "Legacy", "Value": 0}]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_root_sentinel_maps_to_none() {
        let dump = sample_dump();
        assert!(dump.classes[0].superclass().is_none());
        assert_eq!(dump.classes[1].superclass(), Some("Instance"));
    }

    #[test]
    fn test_member_security_shapes() {
        let dump = sample_dump();
        let instance = &dump.classes[0];

        let name = instance.member("Name").unwrap();
        assert_eq!(name.member_type, MemberKind::Property);
        assert!(name.security.permits_write());

        let changed = instance.member("Changed").unwrap();
        assert_eq!(changed.member_type, MemberKind::Event);
        assert_eq!(changed.security, Security::Level("None".to_string()));
    }

    #[test]
    fn test_read_only_tag() {
        let dump = sample_dump();
        let instance = &dump.classes[0];
        assert!(instance.member("ClassName").unwrap().is_read_only());
        assert!(!instance.member("Name").unwrap().is_read_only());
    }

    #[test]
    fn test_scoped_write_level_gates_writability() {
        let security: Security = serde_json::from_value(json!({
            "Read": "None",
            "Write": "PluginSecurity"
        }))
        .unwrap();
        assert!(!security.permits_write());
    }

    #[test]
    fn test_unknown_bare_level_fails_closed() {
        let security = Security::Level("FutureSecurityLevel".to_string());
        assert!(!security.permits_write());
    }

    #[test]
    fn test_store_index_and_misses() {
        let store = SchemaStore::new(sample_dump());
        assert!(store.class("Instance").is_some());
        assert!(store.class("NoSuchClass").is_none());
        assert_eq!(store.classes().len(), 2);
        assert_eq!(store.enums().len(), 1);
    }

    #[test]
    fn test_class_tags() {
        let store = SchemaStore::new(sample_dump());
        assert!(store.class("BasePart").unwrap().has_tag("NotCreatable"));
        assert!(!store.class("Instance").unwrap().has_tag("Deprecated"));
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        let err = SchemaStore::parse_json("not json").unwrap_err();
        assert!(matches!(err, Error::SchemaParse { .. }));
    }
}
