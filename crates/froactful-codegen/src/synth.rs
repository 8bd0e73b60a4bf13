//! Type synthesis, wrapper emission, and template splicing.
//!
//! Shared ancestors (nonzero reference count) get standalone base types
//! composed structurally up the chain; eligible leaf classes get a named
//! props type; every eligible class gets a wrapper function that lifts the
//! `on<Name>` / `bind<Name>` / `ref` convention entries into the host UI
//! library's dedicated slots before instantiating. The finished sections
//! are spliced into the template's three literal markers.

use crate::classify::Field;
use crate::refcount::ReferenceCounts;
use crate::session::Session;
use froactful_core::{Error, Result};
use tracing::info;

/// Marker replaced by top-level type declarations.
pub const MARKER_TOP: &str = "-- FROACTFUL_FUNCTION_TOP";
/// Marker replaced by function-body declarations.
pub const MARKER_BODY: &str = "\t-- FROACTFUL_FUNCTION_BODY";
/// Marker replaced by export-table entries.
pub const MARKER_EXPORTS: &str = "\t\t-- FROACTFUL_FUNCTION_EXPORTS";

/// Disclaimer line prepended to every generated module.
const DISCLAIMER: &str = "-- This file is generated by froactful and not intended to be edited.";

/// Self-type placeholder used at shared-base declaration sites.
const GENERIC_SELF: &str = "Rbx";

/// Prop-rewriting helpers emitted once at the head of the body section.
/// `applyEvent` moves `on<Name>` entries into event slots, `applyChange`
/// moves `bind<Name>` entries into change-observation slots, `applyRef`
/// moves the single `ref` entry; each removes the convention-named entry
/// afterwards.
const PROP_HELPERS: &str = "\
\tlocal function applyEvent(props: any, tags: { any })
\t\tfor _, tag in tags do
\t\t\tprops[(config.Roact.Event :: any)[tag]] = props[\"on\" .. tag]
\t\t\tprops[\"on\" .. tag] = nil
\t\tend
\tend
\tlocal function applyChange(props: any, tags: { any })
\t\tfor _, tag in tags do
\t\t\tprops[(config.Roact.Change :: any)[tag]] = props[\"bind\" .. tag]
\t\t\tprops[\"bind\" .. tag] = nil
\t\tend
\tend
\tlocal function applyRef(props: any)
\t\tif props.ref ~= nil then
\t\t\tprops[config.Roact.Ref :: any] = props.ref
\t\t\tprops.ref = nil
\t\tend
\tend";

/// Renders a sorted field list as a record type body.
fn render_record(fields: &mut Vec<Field>) -> String {
    fields.sort();
    if fields.is_empty() {
        "{ }".to_string()
    } else {
        let entries: Vec<String> = fields.iter().map(Field::render).collect();
        format!("{{ {} }}", entries.join(", "))
    }
}

/// Renders one export-table entry.
fn export_decl(name: &str) -> String {
    format!("\t\t{name} = {name},")
}

impl Session {
    /// Emits the standalone base-type declaration for a shared ancestor.
    ///
    /// The body is the ancestor's own non-inlined field set; the chain is
    /// composed by referencing the superclass's base type, terminating at
    /// a root class whose base type is a plain flat record. An empty delta
    /// collapses to a bare alias.
    pub fn base_type_decl(&mut self, name: &str) -> Result<String> {
        let config = self.config().clone();
        let mut fields = Vec::new();
        if !config.inline_inherited_properties {
            fields.extend(self.property_fields(name));
        }
        if !config.inline_inherited_signals {
            fields.extend(self.signal_fields(name, GENERIC_SELF)?);
        }
        if !config.inline_inherited_bindables {
            fields.extend(self.bindable_fields(name, GENERIC_SELF));
        }

        let suffix = if config.base_types_parameterized() {
            "Props<Rbx>"
        } else {
            "Props"
        };
        let superclass = self.corpus().superclass(name).map(str::to_string);

        Ok(match superclass {
            None => format!("type {name}{suffix} = {}", render_record(&mut fields)),
            Some(sup) if fields.is_empty() => format!("type {name}{suffix} = {sup}{suffix}"),
            Some(sup) => format!(
                "type {name}{suffix} = {sup}{suffix} & {}",
                render_record(&mut fields)
            ),
        })
    }

    /// Computes the props-type expression for an eligible class: the
    /// policy-resolved field union, prefixed by a reference to the
    /// superclass base type unless every kind is inlined.
    pub fn class_props_type(&mut self, name: &str) -> Result<String> {
        let config = self.config().clone();

        let mut fields = if config.inline_inherited_properties {
            self.property_fields_recursive(name)?
        } else {
            self.property_fields(name)
        };
        fields.extend(if config.inline_inherited_signals {
            self.signal_fields_recursive(name, name)?
        } else {
            self.signal_fields(name, name)?
        });
        fields.extend(if config.inline_inherited_bindables {
            self.bindable_fields_recursive(name, name)?
        } else {
            self.bindable_fields(name, name)
        });

        let mut definition = render_record(&mut fields);

        let fully_inlined = config.inline_inherited_properties
            && config.inline_inherited_signals
            && config.inline_inherited_bindables;
        if !fully_inlined
            && let Some(sup) = self.corpus().superclass(name).map(str::to_string)
        {
            let sup_ref = if config.base_types_parameterized() {
                format!("{sup}Props<{name}>")
            } else {
                format!("{sup}Props")
            };
            definition = format!("{sup_ref} & {definition}");
        }

        Ok(definition)
    }

    /// Emits the wrapper constructor for an eligible class.
    pub fn wrapper_decl(&mut self, name: &str, counts: &ReferenceCounts) -> Result<String> {
        let props_ty = if self.config().inline_entire_type {
            self.class_props_type(name)?
        } else if counts.contains(name) {
            format!("{name}Props<{name}>")
        } else {
            format!("{name}Props")
        };

        let signal_names = self.signal_names_recursive(name)?;
        let bindable_names = self.bindable_names_recursive(name)?;

        let mut lines = vec![format!(
            "\tlocal function {name}(props: {props_ty}, children)"
        )];
        if !signal_names.is_empty() {
            lines.push(format!(
                "\t\tapplyEvent(props, {{ {} }})",
                quote_list(&signal_names)
            ));
        }
        if !bindable_names.is_empty() {
            lines.push(format!(
                "\t\tapplyChange(props, {{ {} }})",
                quote_list(&bindable_names)
            ));
        }
        lines.push("\t\tapplyRef(props)".to_string());
        lines.push(format!("\t\treturn e(\"{name}\", props, children)"));
        lines.push("\tend".to_string());
        Ok(lines.join("\n"))
    }

    /// Emits the top-level declaration lines: the `Event` alias, shared
    /// base types in first-encounter order, and named props types for
    /// eligible classes not used as ancestors.
    pub fn top_declarations(
        &mut self,
        eligible: &[String],
        counts: &ReferenceCounts,
    ) -> Result<Vec<String>> {
        let config = self.config().clone();
        let mut lines = Vec::new();

        if !config.inline_signal_bodies {
            lines.push("type Event<Rbx, A...> = (rbx: Rbx, A...) -> ()".to_string());
        }

        let fully_inlined = config.inline_inherited_properties
            && config.inline_inherited_signals
            && config.inline_inherited_bindables;
        if !fully_inlined {
            let shared: Vec<String> = counts.ordered().map(str::to_string).collect();
            for name in shared {
                lines.push(self.base_type_decl(&name)?);
            }
        }

        if !config.inline_entire_type {
            for name in eligible {
                if !counts.contains(name) {
                    let body = self.class_props_type(name)?;
                    lines.push(format!("type {name}Props = {body}"));
                }
            }
        }

        lines.push("-- stylua: ignore".to_string());
        Ok(lines)
    }

    /// Runs the full pipeline and splices the result into the template.
    ///
    /// Sequencing: eligibility is resolved first, then the reference
    /// counts run to completion, and only then is any type synthesized.
    ///
    /// # Errors
    ///
    /// Propagates any fatal resolution error, and
    /// [`Error::TemplateMarker`] if the template lost a splice marker. No
    /// partial output is ever produced.
    pub fn generate(&mut self, template: &str) -> Result<String> {
        let eligible = self.eligible_classes()?;
        let counts = self.count_references(&eligible);

        let top = self.top_declarations(&eligible, &counts)?;
        let mut body = vec![PROP_HELPERS.to_string()];
        for name in &eligible {
            body.push(self.wrapper_decl(name, &counts)?);
        }
        let exports: Vec<String> = eligible.iter().map(|n| export_decl(n)).collect();

        info!(
            top = top.len(),
            wrappers = eligible.len(),
            "synthesized declarations"
        );
        splice(template, &top.join("\n"), &body.join("\n"), &exports.join("\n"))
    }
}

fn quote_list(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("\"{n}\"")).collect();
    quoted.join(", ")
}

/// Replaces the template's three literal markers and prepends the
/// generated-file disclaimer.
///
/// # Errors
///
/// Returns [`Error::TemplateMarker`] if any marker is absent, so a stale
/// template can never silently drop an output section.
pub fn splice(template: &str, top: &str, body: &str, exports: &str) -> Result<String> {
    for marker in [MARKER_TOP, MARKER_BODY, MARKER_EXPORTS] {
        if !template.contains(marker) {
            return Err(Error::TemplateMarker {
                marker: marker.trim_start().to_string(),
            });
        }
    }
    let spliced = template
        .replace(MARKER_BODY, body)
        .replace(MARKER_EXPORTS, exports)
        .replace(MARKER_TOP, top);
    Ok(format!("{DISCLAIMER}\n{spliced}"))
}
