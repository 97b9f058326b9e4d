//! Constructors for `StrataError` variants with boxed payloads.

use std::sync::Arc;

use camino::Utf8PathBuf;
use serde_json::Value;

use crate::schema::FieldViolation;

use super::types::{DocumentParse, InvalidConfiguration, StrataError, UnresolvedProperty};

impl StrataError {
    /// Construct an unresolved-property error.
    #[must_use]
    pub fn unresolved_property(
        name: impl Into<String>,
        known_keys: Vec<String>,
        source_text: impl Into<String>,
    ) -> Self {
        Self::UnresolvedProperty(Box::new(UnresolvedProperty {
            name: name.into(),
            known_keys,
            source_text: source_text.into(),
        }))
    }

    /// Construct a document-parse error for a concrete source.
    #[must_use]
    pub fn document_parse(
        logical_name: impl Into<String>,
        source_identity: impl Into<Utf8PathBuf>,
        cause: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::DocumentParse(Box::new(DocumentParse {
            logical_name: logical_name.into(),
            source_identity: source_identity.into(),
            cause,
        }))
    }

    /// Construct a validation failure carrying full per-field diagnostics.
    #[must_use]
    pub fn configuration_invalid(
        schema: Value,
        merged: Value,
        violations: Vec<FieldViolation>,
    ) -> Self {
        Self::ConfigurationInvalid(Box::new(InvalidConfiguration {
            schema,
            merged,
            violations,
        }))
    }

    /// Wrap this error in an [`Arc`] for use with [`crate::StrataResult`].
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
