//! Rewrite one attribute on elements with a given tag name
//!
//! Selection is two-level: first the element by exact tag name, then the
//! attribute by exact key. Attributes of other elements are never inspected,
//! even when they share the key.
//!
//! # Value rule
//! - no `old_value`: the value becomes `new_value`
//! - with `old_value`: the value must *start with* `old_value`; the *first
//!   occurrence* of `old_value` is then replaced by `new_value`. The guard is
//!   a prefix test, the edit is a substring replace.
//!
//! # Nested elements
//! Once an element matches, only its own attributes are rewritten; its
//! children are not descended into. A same-named element nested inside a
//! matching one is therefore left untouched. Elements that do not match are
//! descended into as usual.

use recast_artifact::{Attribute, MarkupDocument, SourceFile, Tag};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::ExecutionContext;
use crate::recipe::{Recipe, RecipeInfo};
use crate::visitor::{map_shared, visit_source, walk_tag, MarkupVisitor};

/// Options of the attribute rewrite, and the recipe itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeXmlAttribute {
    /// Tag name of the elements to edit
    pub element_name: String,

    /// Key of the attribute to edit
    pub attribute_name: String,

    /// Required value prefix; absent means "any value"
    #[serde(default)]
    pub old_value: Option<String>,

    /// Replacement
    pub new_value: String,
}

impl ChangeXmlAttribute {
    /// Build the recipe
    #[must_use]
    pub fn new(
        element_name: impl Into<String>,
        attribute_name: impl Into<String>,
        old_value: Option<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            element_name: element_name.into(),
            attribute_name: attribute_name.into(),
            old_value,
            new_value: new_value.into(),
        }
    }

    /// Fresh visitor borrowing these options
    #[inline]
    #[must_use]
    pub fn visitor(&self) -> ChangeAttributeVisitor<'_> {
        ChangeAttributeVisitor {
            options: self,
            rewritten: 0,
        }
    }

    /// Rewrite a tree, returning the original when nothing matched
    #[must_use]
    pub fn rewrite(&self, tag: &Tag) -> Tag {
        self.visitor()
            .visit_tag(tag)
            .unwrap_or_else(|| tag.clone())
    }

    /// Rewrite a document, returning the original when nothing matched
    #[must_use]
    pub fn rewrite_document(&self, doc: &MarkupDocument) -> MarkupDocument {
        self.visitor()
            .visit_document(doc)
            .unwrap_or_else(|| doc.clone())
    }

    /// New value for `current`, or `None` if the prefix guard rejects it
    #[must_use]
    pub fn changed_value(&self, current: &str) -> Option<String> {
        match &self.old_value {
            None => Some(self.new_value.clone()),
            Some(old) if current.starts_with(old.as_str()) => {
                Some(current.replacen(old.as_str(), &self.new_value, 1))
            }
            Some(_) => None,
        }
    }
}

impl RecipeInfo for ChangeXmlAttribute {
    fn name(&self) -> &'static str {
        "change_xml_attribute"
    }

    fn display_name(&self) -> &'static str {
        "Change XML attribute"
    }

    fn description(&self) -> &'static str {
        "Alters the value of an attribute on every element with the given tag name, \
         optionally only when the current value starts with a given prefix."
    }
}

impl Recipe for ChangeXmlAttribute {
    fn visit(&self, source: &SourceFile, _ctx: &mut ExecutionContext) -> Option<SourceFile> {
        let mut visitor = self.visitor();
        let out = visit_source(&mut visitor, source);
        if out.is_some() {
            debug!(
                path = %source.source_path(),
                element = %self.element_name,
                attribute = %self.attribute_name,
                rewritten = visitor.rewritten(),
                "rewrote attribute values"
            );
        }
        out
    }
}

/// Tree walker applying a [`ChangeXmlAttribute`]
#[derive(Debug)]
pub struct ChangeAttributeVisitor<'a> {
    options: &'a ChangeXmlAttribute,
    rewritten: usize,
}

impl ChangeAttributeVisitor<'_> {
    /// Attributes rewritten so far
    #[inline]
    #[must_use]
    pub fn rewritten(&self) -> usize {
        self.rewritten
    }

    fn visit_chosen_attribute(&mut self, attribute: &Attribute) -> Option<Attribute> {
        if attribute.key() != self.options.attribute_name {
            return None;
        }
        let current = attribute.value_as_str();
        let changed = self.options.changed_value(current)?;
        if changed == current {
            return None;
        }
        self.rewritten += 1;
        let value = attribute.value().clone().with_value(changed);
        Some(attribute.clone().with_value(value))
    }
}

impl MarkupVisitor for ChangeAttributeVisitor<'_> {
    fn visit_tag(&mut self, tag: &Tag) -> Option<Tag> {
        if tag.name() == self.options.element_name {
            map_shared(tag.attributes(), |a| self.visit_chosen_attribute(a))
                .map(|attributes| tag.clone().with_attributes(attributes))
        } else {
            walk_tag(self, tag)
        }
    }
}
