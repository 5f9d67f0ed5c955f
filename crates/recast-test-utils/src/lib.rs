//! Testing utilities for the recast workspace
//!
//! Shared fixtures and builders. Everything here panics on bad input; it is
//! only meant for tests.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use recast_artifact::{
    Attribute, MarkupDocument, PlainText, SourceFile, SourcePath, SourceSet, Tag,
};
use recast_recipe::{RecipeSpec, RunnableRecipe};

pub fn path(raw: &str) -> SourcePath {
    SourcePath::parse(raw).unwrap()
}

pub fn plain_text(raw_path: &str, text: &str) -> SourceFile {
    PlainText::new(path(raw_path), text).into()
}

/// `<bean id=".." class=".."/>`
pub fn bean(id: &str, class: &str) -> Tag {
    Tag::new("bean")
        .with_attribute(Attribute::new("id", id))
        .with_attribute(Attribute::new("class", class))
}

/// `<beans>` document holding `beans` in order
pub fn beans_document(raw_path: &str, beans: impl IntoIterator<Item = Tag>) -> SourceFile {
    let root = beans
        .into_iter()
        .fold(Tag::new("beans"), |parent, child| parent.with_child(child));
    MarkupDocument::new(path(raw_path), root)
        .with_prolog(r#"<?xml version="1.0" encoding="UTF-8"?>"#)
        .into()
}

pub fn source_set(files: impl IntoIterator<Item = SourceFile>) -> SourceSet {
    files.into_iter().collect()
}

pub fn runnable(specs: impl IntoIterator<Item = RecipeSpec>) -> Vec<Box<dyn RunnableRecipe>> {
    specs.into_iter().map(RecipeSpec::into_runnable).collect()
}

/// Text of the plain-text file at `raw_path`
pub fn text_at<'a>(sources: &'a SourceSet, raw_path: &str) -> Option<&'a str> {
    sources
        .get(&path(raw_path))
        .and_then(SourceFile::as_plain_text)
        .map(PlainText::text)
}

/// `class` values of every `<bean>` directly under the root of the document at `raw_path`
pub fn bean_classes(sources: &SourceSet, raw_path: &str) -> Vec<String> {
    let doc = sources
        .get(&path(raw_path))
        .and_then(SourceFile::as_markup)
        .unwrap();
    doc.root()
        .child_tags()
        .filter(|t| t.name() == "bean")
        .filter_map(|t| t.attribute("class"))
        .map(|a| a.value_as_str().to_string())
        .collect()
}
