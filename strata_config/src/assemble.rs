//! End-to-end assembly of a validated configuration.
//!
//! Assembly is a single synchronous operation: enumerate resource
//! candidates, load and expand their documents, deep-merge them in
//! deterministic order, layer the override sources on top, and validate the
//! result. Each invocation is independent; nothing is cached across runs.

use camino::Utf8Path;
use serde_json::Value;
use tracing::debug;

use crate::enumerate::enumerate;
use crate::error::{StrataError, StrataResult};
use crate::expand::expand;
use crate::loader::load_documents;
use crate::merge::{merge, merge_documents};
use crate::options::AssemblyOptions;
use crate::overrides::parse_cli_overrides;
use crate::parser::ExtensionTable;
use crate::repository::ResourceRepository;
use crate::schema::{CoercionStrategy, validate};
use crate::snapshot::EnvironmentSnapshot;

/// Assembles configuration from a resource repository and an injected
/// coercion strategy.
pub struct Assembler<'a> {
    repository: &'a dyn ResourceRepository,
    strategy: &'a dyn CoercionStrategy,
}

impl<'a> Assembler<'a> {
    /// Create an assembler over the given collaborators.
    #[must_use]
    pub const fn new(
        repository: &'a dyn ResourceRepository,
        strategy: &'a dyn CoercionStrategy,
    ) -> Self {
        Self {
            repository,
            strategy,
        }
    }

    /// Run the full assembly pipeline.
    ///
    /// Layering order, lowest to highest precedence: enumerated documents
    /// (profile, then variant, then extension), additional files from the
    /// options, additional files from `--load` tokens, the explicit
    /// override map, and finally the CLI override map. Every step
    /// deep-merges onto the accumulator and the result is validated before
    /// being returned.
    ///
    /// # Errors
    ///
    /// Any failure (unresolved property, unreadable source, parse failure,
    /// malformed CLI token, merge mismatch, or validation rejection) aborts
    /// the whole run; a partial configuration is never returned.
    pub fn assemble(&self, options: AssemblyOptions) -> StrataResult<Value> {
        let AssemblyOptions {
            prefix,
            schemas,
            overrides,
            profiles,
            variants,
            template,
            extensions,
            additional_files,
            args,
            properties,
        } = options;

        let snapshot = EnvironmentSnapshot::capture(properties);
        let cli = parse_cli_overrides(&args)?;

        let candidates = enumerate(&prefix, &profiles, &variants, &extensions, template.as_ref());
        let mut layers = Vec::new();
        for candidate in &candidates {
            let Some(parser) = extensions.parser_for(&candidate.extension) else {
                continue;
            };
            let documents = load_documents(
                &candidate.logical_name,
                parser.as_ref(),
                &snapshot,
                self.repository,
            )?;
            layers.extend(documents);
        }
        debug!(
            candidates = candidates.len(),
            layers = layers.len(),
            "merged enumerated documents"
        );

        for path in additional_files.iter().chain(cli.additional_files.iter()) {
            layers.push(load_additional_file(path, &extensions, &snapshot)?);
            debug!(file = %path, "layered additional file");
        }

        let mut merged = merge_documents(layers)?;
        if let Some(map) = overrides {
            merged = merge(merged, Value::Object(map))?;
            debug!("layered explicit overrides");
        }
        if cli.overrides.as_object().is_some_and(|map| !map.is_empty()) {
            merged = merge(merged, cli.overrides)?;
            debug!("layered command-line overrides");
        }

        validate(merged, schemas, self.strategy)
    }
}

/// Load one explicitly-listed file. Unlike enumerated resources, a missing
/// explicit file is an error: the path was named deliberately.
fn load_additional_file(
    path: &Utf8Path,
    extensions: &ExtensionTable,
    snapshot: &EnvironmentSnapshot,
) -> StrataResult<Value> {
    let extension = path.extension().unwrap_or("");
    let Some(parser) = extensions.parser_for(extension) else {
        return Err(StrataError::Resource {
            identity: path.to_owned(),
            source: std::io::Error::other(format!(
                "no parser registered for extension '{extension}'"
            )),
        }
        .into_shared());
    };
    let text = std::fs::read_to_string(path).map_err(|source| {
        StrataError::Resource {
            identity: path.to_owned(),
            source,
        }
        .into_shared()
    })?;
    let expanded = expand(&text, snapshot)?;
    parser.parse(&expanded).map_err(|cause| {
        StrataError::document_parse(path.as_str(), path.to_owned(), cause).into_shared()
    })
}
