//! Ordered collection of source files keyed by path

use indexmap::IndexMap;

use crate::artifact::SourceFile;
use crate::path::SourcePath;

/// The artifacts a run operates on
///
/// Iteration order is insertion order. Inserting a file at an existing path
/// replaces it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    files: IndexMap<SourcePath, SourceFile>,
}

impl SourceSet {
    /// Empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file, returning the one it displaced
    pub fn insert(&mut self, file: SourceFile) -> Option<SourceFile> {
        self.files.insert(file.source_path().clone(), file)
    }

    /// File at `path`
    #[inline]
    #[must_use]
    pub fn get(&self, path: &SourcePath) -> Option<&SourceFile> {
        self.files.get(path)
    }

    /// Whether any file lives at `path`
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &SourcePath) -> bool {
        self.files.contains_key(path)
    }

    /// Files in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    /// Paths in insertion order
    pub fn paths(&self) -> impl Iterator<Item = &SourcePath> {
        self.files.keys()
    }

    /// Number of files
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<SourceFile> for SourceSet {
    fn from_iter<I: IntoIterator<Item = SourceFile>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<SourceFile> for SourceSet {
    fn extend<I: IntoIterator<Item = SourceFile>>(&mut self, iter: I) {
        for file in iter {
            self.insert(file);
        }
    }
}

impl IntoIterator for SourceSet {
    type Item = SourceFile;
    type IntoIter = indexmap::map::IntoValues<SourcePath, SourceFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_values()
    }
}

impl<'a> IntoIterator for &'a SourceSet {
    type Item = &'a SourceFile;
    type IntoIter = indexmap::map::Values<'a, SourcePath, SourceFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.values()
    }
}
