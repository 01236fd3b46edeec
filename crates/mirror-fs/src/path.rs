//! Normalized path handling for cross-platform comparability

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Mirror trees are compared by relative path; normalizing separators once
/// at the boundary keeps comparisons and fingerprints stable across
/// platforms. Converted back to platform-native form only for I/O.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a relative segment.
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        let segment = Self::new(segment);
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment.inner)
        } else {
            format!("{}/{}", self.inner, segment.inner)
        };
        Self { inner: joined }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Resolve to an absolute, symlink-free form.
    ///
    /// Uses `dunce` so Windows results stay in legacy (non-UNC) form and
    /// remain comparable with user-supplied paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or cannot be resolved.
    pub fn canonicalize(&self) -> Result<Self> {
        let native = self.to_native();
        let resolved = dunce::canonicalize(&native).map_err(|e| Error::io(&native, e))?;
        Ok(Self::new(resolved))
    }

    /// Check whether `self` is `other` or lies beneath it.
    ///
    /// Purely lexical; callers should canonicalize both sides first.
    pub fn is_within(&self, other: &NormalizedPath) -> bool {
        let base = other.inner.trim_end_matches('/');
        self.inner == base
            || self
                .inner
                .strip_prefix(base)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}
