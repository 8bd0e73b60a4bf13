//! Generation session: inheritance resolution with explicit memoization.
//!
//! A [`Session`] owns the schema store, the corpus index, the configuration,
//! and every memo table for one run. Nothing here is process-global; two
//! sessions can never contaminate each other, and dropping the session
//! drops every cache with it.
//!
//! All resolution operations are pure functions of (class, policy,
//! self-type) over the immutable source documents, so each memo table is
//! write-once per key. The ancestor graph can be deep and every leaf class
//! re-touches shared ancestors, which makes the per-key memoization the
//! dominant performance concern — a class with a long lineage is resolved
//! once per distinct key, not once per descendant.

use crate::classify::{
    Field, bindable_slot_type, is_bindable, is_signal, is_unrepresentable, make_optional,
    rewrite_property_type, signal_slot_type,
};
use crate::filter::field_writable;
use froactful_core::{Error, GenerateConfig, Result};
use froactful_schema::{CorpusIndex, RawField, SchemaStore, parse_fields};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Memo key for self-typed field sets: (class, self type).
type SelfTypedKey = (String, String);

/// One generation run over an immutable schema snapshot.
#[derive(Debug)]
pub struct Session {
    schema: SchemaStore,
    corpus: CorpusIndex,
    config: GenerateConfig,

    // Memo tables, keyed per spec'd resolution operation. Field lists are
    // cloned out on every hit; they are short (a class's own block).
    chains: HashMap<String, Vec<String>>,
    parsed: HashMap<String, Vec<RawField>>,
    properties: HashMap<String, Vec<Field>>,
    signals: HashMap<SelfTypedKey, Vec<Field>>,
    bindables: HashMap<SelfTypedKey, Vec<Field>>,
    properties_recursive: HashMap<String, Vec<Field>>,
    signals_recursive: HashMap<SelfTypedKey, Vec<Field>>,
    bindables_recursive: HashMap<SelfTypedKey, Vec<Field>>,
}

impl Session {
    /// Creates a session over one schema snapshot and one corpus.
    #[must_use]
    pub fn new(schema: SchemaStore, corpus: CorpusIndex, config: GenerateConfig) -> Self {
        Self {
            schema,
            corpus,
            config,
            chains: HashMap::new(),
            parsed: HashMap::new(),
            properties: HashMap::new(),
            signals: HashMap::new(),
            bindables: HashMap::new(),
            properties_recursive: HashMap::new(),
            signals_recursive: HashMap::new(),
            bindables_recursive: HashMap::new(),
        }
    }

    /// The schema store backing this session.
    #[must_use]
    pub fn schema(&self) -> &SchemaStore {
        &self.schema
    }

    /// The corpus index backing this session.
    #[must_use]
    pub fn corpus(&self) -> &CorpusIndex {
        &self.corpus
    }

    /// The configuration this session resolves under.
    #[must_use]
    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Computes the ancestor sequence of a class, nearest first, root-most
    /// last, following corpus `extends` clauses. A class missing from the
    /// corpus terminates the chain (drift tolerance).
    ///
    /// # Errors
    ///
    /// Returns [`Error::CyclicInheritance`] if the walk revisits a class.
    /// The schema is expected to be a forest; failing fast here keeps every
    /// downstream recursion finite.
    pub fn ancestor_chain(&mut self, class: &str) -> Result<Vec<String>> {
        if let Some(chain) = self.chains.get(class) {
            return Ok(chain.clone());
        }

        let mut chain = Vec::new();
        let mut visited: HashSet<&str> = HashSet::from([class]);
        let mut current = class;
        while let Some(superclass) = self.corpus.superclass(current) {
            if !visited.insert(superclass) {
                return Err(Error::CyclicInheritance {
                    class: superclass.to_string(),
                });
            }
            chain.push(superclass.to_string());
            current = superclass;
        }

        self.chains.insert(class.to_string(), chain.clone());
        Ok(chain)
    }

    /// Returns `true` if `ancestor` is `class` itself or appears in its
    /// ancestor chain.
    pub fn has_ancestor(&mut self, class: &str, ancestor: &str) -> Result<bool> {
        if class == ancestor {
            return Ok(true);
        }
        Ok(self.ancestor_chain(class)?.iter().any(|c| c == ancestor))
    }

    /// The class's own (non-inherited) raw fields, parsed from its corpus
    /// block. Empty when the class has no corpus entry.
    pub fn parsed_fields(&mut self, class: &str) -> Vec<RawField> {
        if let Some(fields) = self.parsed.get(class) {
            return fields.clone();
        }
        let fields = self
            .corpus
            .raw_block(class)
            .map(parse_fields)
            .unwrap_or_default();
        self.parsed.insert(class.to_string(), fields.clone());
        fields
    }

    /// The class's own property fields: non-signal, representable,
    /// writable per the security filter, types rewritten and widened to
    /// optional.
    pub fn property_fields(&mut self, class: &str) -> Vec<Field> {
        if let Some(fields) = self.properties.get(class) {
            return fields.clone();
        }

        let parsed = self.parsed_fields(class);
        let fields: Vec<Field> = parsed
            .iter()
            .filter(|f| !is_signal(&f.signature))
            .filter(|f| !is_unrepresentable(&f.signature))
            .filter(|f| field_writable(&self.schema, class, &f.name))
            .map(|f| Field {
                name: f.name.clone(),
                ty: make_optional(&rewrite_property_type(&f.signature)),
            })
            .collect();
        debug!(class, count = fields.len(), "resolved own properties");

        self.properties.insert(class.to_string(), fields.clone());
        fields
    }

    /// The class's own signal fields, displayed as `on<Name>` slots typed
    /// against `self_type`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignalSignature`] for a signal whose signature
    /// matches neither grammar.
    pub fn signal_fields(&mut self, class: &str, self_type: &str) -> Result<Vec<Field>> {
        let key = (class.to_string(), self_type.to_string());
        if let Some(fields) = self.signals.get(&key) {
            return Ok(fields.clone());
        }

        let inline_body = self.config.inline_signal_bodies;
        let mut fields = Vec::new();
        for raw in self.parsed_fields(class) {
            if !is_signal(&raw.signature) {
                continue;
            }
            fields.push(Field {
                name: format!("on{}", raw.name),
                ty: signal_slot_type(&raw.name, &raw.signature, self_type, inline_body)?,
            });
        }

        self.signals.insert(key, fields.clone());
        Ok(fields)
    }

    /// The class's own bindable fields, displayed as `bind<Name>` slots
    /// typed against `self_type`.
    ///
    /// Bindables are observation slots, so the security (write) filter
    /// does not apply to them.
    pub fn bindable_fields(&mut self, class: &str, self_type: &str) -> Vec<Field> {
        let key = (class.to_string(), self_type.to_string());
        if let Some(fields) = self.bindables.get(&key) {
            return fields.clone();
        }

        let fields: Vec<Field> = self
            .parsed_fields(class)
            .iter()
            .filter(|f| !is_signal(&f.signature) && is_bindable(class, &f.name))
            .map(|f| Field {
                name: format!("bind{}", f.name),
                ty: bindable_slot_type(self_type),
            })
            .collect();

        self.bindables.insert(key, fields.clone());
        fields
    }

    /// Property fields of the class and its full ancestor chain.
    pub fn property_fields_recursive(&mut self, class: &str) -> Result<Vec<Field>> {
        if let Some(fields) = self.properties_recursive.get(class) {
            return Ok(fields.clone());
        }

        let mut fields = self.property_fields(class);
        for ancestor in self.ancestor_chain(class)? {
            fields.extend(self.property_fields(&ancestor));
        }

        self.properties_recursive
            .insert(class.to_string(), fields.clone());
        Ok(fields)
    }

    /// Signal fields of the class and its full ancestor chain, all typed
    /// against the same `self_type`.
    pub fn signal_fields_recursive(&mut self, class: &str, self_type: &str) -> Result<Vec<Field>> {
        let key = (class.to_string(), self_type.to_string());
        if let Some(fields) = self.signals_recursive.get(&key) {
            return Ok(fields.clone());
        }

        let mut fields = self.signal_fields(class, self_type)?;
        for ancestor in self.ancestor_chain(class)? {
            fields.extend(self.signal_fields(&ancestor, self_type)?);
        }

        self.signals_recursive.insert(key, fields.clone());
        Ok(fields)
    }

    /// Bindable fields of the class and its full ancestor chain.
    pub fn bindable_fields_recursive(
        &mut self,
        class: &str,
        self_type: &str,
    ) -> Result<Vec<Field>> {
        let key = (class.to_string(), self_type.to_string());
        if let Some(fields) = self.bindables_recursive.get(&key) {
            return Ok(fields.clone());
        }

        let mut fields = self.bindable_fields(class, self_type);
        for ancestor in self.ancestor_chain(class)? {
            fields.extend(self.bindable_fields(&ancestor, self_type));
        }

        self.bindables_recursive.insert(key, fields.clone());
        Ok(fields)
    }

    /// Sorted, deduplicated raw names of every signal the class exposes,
    /// inherited ones included. These drive the wrapper's event rewriting.
    pub fn signal_names_recursive(&mut self, class: &str) -> Result<Vec<String>> {
        let mut fields = self.parsed_fields(class);
        for ancestor in self.ancestor_chain(class)? {
            fields.extend(self.parsed_fields(&ancestor));
        }
        let mut names: Vec<String> = fields
            .into_iter()
            .filter(|f| is_signal(&f.signature))
            .map(|f| f.name)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Sorted, deduplicated raw names of every bindable property the class
    /// exposes, inherited ones included. These drive the wrapper's change
    /// rewriting.
    pub fn bindable_names_recursive(&mut self, class: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut blocks = vec![(class.to_string(), self.parsed_fields(class))];
        for ancestor in self.ancestor_chain(class)? {
            let fields = self.parsed_fields(&ancestor);
            blocks.push((ancestor, fields));
        }
        for (owner, fields) in blocks {
            for f in fields {
                if !is_signal(&f.signature) && is_bindable(&owner, &f.name) {
                    names.push(f.name);
                }
            }
        }
        names.sort();
        names.dedup();
        Ok(names)
    }
}
