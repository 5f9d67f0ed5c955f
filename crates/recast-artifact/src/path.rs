//! Source paths for identifying artifacts
//!
//! Provides [`SourcePath`], the normalized relative path two artifacts are
//! compared by. Normalization happens once, at construction, so equality and
//! hashing are plain string operations afterwards.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Normalized path of a source artifact
///
/// # Normalization
/// - `\` is treated as a separator and printed as `/`
/// - repeated separators collapse (`a//b` → `a/b`)
/// - `.` segments and trailing separators are dropped (`./a/./b/` → `a/b`)
/// - a leading `/` is kept, so `/a/b.txt` and `a/b.txt` are different paths
/// - `..` segments are kept verbatim; resolving them needs a filesystem root
///
/// # Examples
/// - `foo\bar\baz.txt` → `foo/bar/baz.txt`
/// - `/a//b.txt` → `/a/b.txt`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePath {
    normalized: String,
    absolute: bool,
}

impl SourcePath {
    /// Parse and normalize a path
    ///
    /// # Errors
    /// Returns [`PathError::Empty`] if nothing but separators and `.` remain
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let absolute = raw.starts_with(['/', '\\']);
        let segments: Vec<&str> = raw
            .split(['/', '\\'])
            .filter(|seg| !seg.is_empty() && *seg != ".")
            .collect();

        if segments.is_empty() {
            return Err(PathError::Empty(raw.to_string()));
        }

        let joined = segments.join("/");
        let normalized = if absolute { format!("/{joined}") } else { joined };
        Ok(Self {
            normalized,
            absolute,
        })
    }

    /// Normalized string form
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Whether the path was rooted (`/a/b.txt`)
    #[inline]
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Path segments from first directory to file name
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.relative_part().split('/')
    }

    /// Last segment
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> &str {
        let rel = self.relative_part();
        rel.rsplit_once('/').map_or(rel, |(_, name)| name)
    }

    /// Extension of the file name, without the dot
    ///
    /// Dotfiles such as `.gitignore` have no extension.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        match self.file_name().rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Containing directory, if the path has more than one segment
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (dir, _) = self.normalized.rsplit_once('/')?;
        if dir.is_empty() {
            // "/file" has the root as parent, which is not an artifact path
            return None;
        }
        Some(Self {
            normalized: dir.to_string(),
            absolute: self.absolute,
        })
    }

    /// Append a relative path
    ///
    /// # Errors
    /// Returns error if `child` normalizes to nothing
    pub fn join(&self, child: &str) -> Result<Self, PathError> {
        let child = Self::parse(child)?;
        Ok(Self {
            normalized: format!("{}/{}", self.normalized, child.relative_part()),
            absolute: self.absolute,
        })
    }

    fn relative_part(&self) -> &str {
        if self.absolute {
            &self.normalized[1..]
        } else {
            &self.normalized
        }
    }
}

impl Display for SourcePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl FromStr for SourcePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SourcePath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl AsRef<str> for SourcePath {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

impl serde::Serialize for SourcePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

impl<'de> serde::Deserialize<'de> for SourcePath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Errors related to source paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Nothing left after normalization
    #[error("path '{0}' is empty after normalization")]
    Empty(String),
}
