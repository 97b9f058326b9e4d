//! Loading, expansion, and parsing of documents for a logical name.

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{StrataError, StrataResult};
use crate::expand::expand;
use crate::parser::DocumentParser;
use crate::repository::ResourceRepository;
use crate::snapshot::EnvironmentSnapshot;

/// Load every document available for `logical_name`.
///
/// Each raw source is expanded against `snapshot` before parsing. A missing
/// resource (zero sources) yields an empty vector; optional profile and
/// variant files rely on this.
///
/// # Errors
///
/// Returns [`StrataError::UnresolvedProperty`] when expansion fails,
/// [`StrataError::DocumentParse`] when any source fails to parse, and
/// [`StrataError::Resource`] when the repository cannot read a source. All
/// are fatal for the assembly run; no partial configuration is produced.
pub fn load_documents(
    logical_name: &str,
    parser: &dyn DocumentParser,
    snapshot: &EnvironmentSnapshot,
    repository: &dyn ResourceRepository,
) -> StrataResult<Vec<Value>> {
    let sources = repository.sources(logical_name)?;
    if sources.is_empty() {
        trace!(logical_name, "no sources for candidate");
        return Ok(Vec::new());
    }
    let mut documents = Vec::with_capacity(sources.len());
    for source in sources {
        let expanded = expand(&source.text, snapshot)?;
        let parsed = parser.parse(&expanded).map_err(|cause| {
            StrataError::document_parse(logical_name, source.identity.clone(), cause).into_shared()
        })?;
        debug!(logical_name, source = %source.identity, "loaded document");
        documents.push(parsed);
    }
    Ok(documents)
}
