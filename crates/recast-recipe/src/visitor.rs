//! Markup tree traversal
//!
//! [`MarkupVisitor`] descends a [`MarkupDocument`] and lets implementors
//! replace nodes. Every `visit_*` method returns `None` when the node is
//! unchanged, so a traversal that edits nothing allocates nothing and a
//! traversal that edits one attribute rebuilds only the path to it.

use recast_artifact::{Attribute, Content, MarkupDocument, SourceFile, Tag, Vector};

/// Pattern-based descent over a markup tree
///
/// Override the `visit_*` hook for the node kind of interest; call the
/// matching `walk_*` function from an override to keep descending.
pub trait MarkupVisitor {
    /// Visit a whole document. Default: visit the root element.
    fn visit_document(&mut self, doc: &MarkupDocument) -> Option<MarkupDocument> {
        walk_document(self, doc)
    }

    /// Visit an element. Default: visit its attributes, then its child tags.
    fn visit_tag(&mut self, tag: &Tag) -> Option<Tag> {
        walk_tag(self, tag)
    }

    /// Visit one attribute. Default: leave it.
    fn visit_attribute(&mut self, _attribute: &Attribute) -> Option<Attribute> {
        None
    }
}

/// Default document descent
pub fn walk_document<V: MarkupVisitor + ?Sized>(
    visitor: &mut V,
    doc: &MarkupDocument,
) -> Option<MarkupDocument> {
    visitor
        .visit_tag(doc.root())
        .map(|root| doc.clone().with_root(root))
}

/// Default element descent: attributes first, then child tags in order
pub fn walk_tag<V: MarkupVisitor + ?Sized>(visitor: &mut V, tag: &Tag) -> Option<Tag> {
    let attributes = map_shared(tag.attributes(), |a| visitor.visit_attribute(a));
    let content = tag.content().and_then(|children| {
        map_shared(children, |child| match child {
            Content::Tag(nested) => visitor.visit_tag(nested).map(Content::Tag),
            Content::CharData(_) | Content::Comment(_) => None,
        })
    });

    if attributes.is_none() && content.is_none() {
        return None;
    }

    let mut out = tag.clone();
    if let Some(attributes) = attributes {
        out = out.with_attributes(attributes);
    }
    if let Some(content) = content {
        out = out.with_content(Some(content));
    }
    Some(out)
}

/// Map a persistent vector, copying it only if some element changed
///
/// `f` returns `None` for "unchanged". The result is `None` when every call
/// returned `None`; otherwise it is a copy of `items` that shares all
/// untouched elements with the original.
pub fn map_shared<T, F>(items: &Vector<T>, mut f: F) -> Option<Vector<T>>
where
    T: Clone,
    F: FnMut(&T) -> Option<T>,
{
    let mut out: Option<Vector<T>> = None;
    for (index, item) in items.iter().enumerate() {
        if let Some(replacement) = f(item) {
            out.get_or_insert_with(|| items.clone())[index] = replacement;
        }
    }
    out
}

/// Run a visitor over a source file; non-markup files are never changed
pub fn visit_source<V: MarkupVisitor + ?Sized>(
    visitor: &mut V,
    source: &SourceFile,
) -> Option<SourceFile> {
    source
        .as_markup()
        .and_then(|doc| visitor.visit_document(doc))
        .map(SourceFile::Markup)
}
