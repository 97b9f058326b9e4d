//! Resolution of logical resource names to raw text sources.
//!
//! A repository produces a finite, unordered-but-complete set of sources per
//! logical name. Zero sources is an expected outcome (optional profile and
//! variant files), one is the common case, and several are legal: the same
//! logical name may exist in multiple search locations, and every copy is
//! loaded. Callers must not rely on the relative order of duplicates.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::{StrataError, StrataResult};

/// A raw text blob associated with a logical resource name.
#[derive(Clone, Debug)]
pub struct RawSource {
    /// Identity of the concrete source, carried on parse failures.
    pub identity: Utf8PathBuf,
    /// The raw, unexpanded document text.
    pub text: String,
}

/// Resolves logical resource names to raw sources.
pub trait ResourceRepository {
    /// Return every source known for `logical_name`.
    ///
    /// An unknown name yields an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Resource`] when a source exists but cannot be
    /// read.
    fn sources(&self, logical_name: &str) -> StrataResult<Vec<RawSource>>;
}

/// Filesystem repository searching an ordered list of root directories.
///
/// Each root is probed for `root/<logical_name>`; every hit is returned, so
/// a logical name present under several roots loads once per root. Results
/// follow root order, which is deterministic for a given repository, but the
/// repository contract leaves duplicate order unspecified and callers must
/// not depend on it.
#[derive(Clone, Debug)]
pub struct DirectoryRepository {
    roots: Vec<Utf8PathBuf>,
}

impl DirectoryRepository {
    /// Create a repository over the given search roots.
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// The search roots, in probe order.
    #[must_use]
    pub fn roots(&self) -> &[Utf8PathBuf] {
        &self.roots
    }
}

impl ResourceRepository for DirectoryRepository {
    fn sources(&self, logical_name: &str) -> StrataResult<Vec<RawSource>> {
        let mut sources = Vec::new();
        for root in &self.roots {
            let candidate = root.join(logical_name);
            if !candidate.is_file() {
                continue;
            }
            let text = std::fs::read_to_string(&candidate).map_err(|source| {
                StrataError::Resource {
                    identity: candidate.clone(),
                    source,
                }
                .into_shared()
            })?;
            sources.push(RawSource {
                identity: candidate,
                text,
            });
        }
        Ok(sources)
    }
}

/// In-memory repository for tests and embedding scenarios.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRepository {
    entries: Vec<(String, RawSource)>,
}

impl InMemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source under `logical_name`; repeated names accumulate.
    #[must_use]
    pub fn with_source(
        mut self,
        logical_name: impl Into<String>,
        identity: impl AsRef<Utf8Path>,
        text: impl Into<String>,
    ) -> Self {
        self.entries.push((
            logical_name.into(),
            RawSource {
                identity: identity.as_ref().to_owned(),
                text: text.into(),
            },
        ));
        self
    }
}

impl ResourceRepository for InMemoryRepository {
    fn sources(&self, logical_name: &str) -> StrataResult<Vec<RawSource>> {
        Ok(self
            .entries
            .iter()
            .filter(|(name, _)| name == logical_name)
            .map(|(_, source)| source.clone())
            .collect())
    }
}
