//! Layered configuration assembly for multi-component services.
//!
//! The crate assembles a single validated configuration mapping from a
//! deterministically-ordered set of layered document sources: bundled
//! defaults, environment and variant overlays, explicitly listed files, and
//! command-line overrides. Raw document text is expanded for `${NAME}` and
//! `${NAME:default}` property references before parsing, parsed documents
//! are deep-merged in precedence order, and the result is coerced against a
//! caller-supplied schema by an injected [`CoercionStrategy`].
//!
//! The lifecycle framework that owns application components is an external
//! collaborator; it receives the assembled mapping (or per-component slices
//! via [`configure_components`]) and is otherwise out of scope, as are the
//! concrete schema language and any hot-reload mechanics.
//!
//! # Examples
//!
//! ```
//! use strata_config::{
//!     Assembler, AssemblyOptions, CoercionStrategy, FieldViolation, InMemoryRepository,
//! };
//! use serde_json::{Value, json};
//!
//! struct PassThrough;
//!
//! impl CoercionStrategy for PassThrough {
//!     fn coerce(&self, merged: &Value, _schema: &Value) -> Result<Value, Vec<FieldViolation>> {
//!         Ok(merged.clone())
//!     }
//! }
//!
//! let repository = InMemoryRepository::new()
//!     .with_source("app-web-configuration.yaml", "base/app-web-configuration.yaml", "web:\n  port: 8080\n")
//!     .with_source("app-web-local-configuration.yaml", "base/app-web-local-configuration.yaml", "web:\n  port: 9090\n");
//! let options = AssemblyOptions::builder("app").profile("web").build();
//! let configuration = Assembler::new(&repository, &PassThrough).assemble(options)?;
//! assert_eq!(configuration, json!({"web": {"port": 9090}}));
//! # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
//! ```

mod assemble;
mod component;
mod enumerate;
mod error;
mod expand;
mod loader;
mod merge;
mod options;
mod overrides;
mod parser;
mod repository;
mod schema;
mod snapshot;

pub use assemble::Assembler;
pub use component::{Configurable, configure_components, slice_for_profile};
pub use enumerate::{DashJoinedTemplate, PathTemplate, ResourceCandidate, enumerate};
pub use error::{
    DocumentParse, InvalidConfiguration, StrataError, StrataResult, UnresolvedProperty, ValueKind,
};
pub use expand::expand;
pub use loader::load_documents;
pub use merge::{merge, merge_documents};
pub use options::{AssemblyOptions, AssemblyOptionsBuilder};
pub use overrides::{CliOverrides, parse_cli_overrides};
#[cfg(feature = "json5")]
pub use parser::Json5Parser;
#[cfg(feature = "toml")]
pub use parser::TomlParser;
#[cfg(feature = "yaml")]
pub use parser::YamlParser;
pub use parser::{DocumentParser, ExtensionTable, ParseFailure};
pub use repository::{DirectoryRepository, InMemoryRepository, RawSource, ResourceRepository};
pub use schema::{CoercionStrategy, FieldViolation, validate};
pub use snapshot::{EnvironmentSnapshot, remove_process_property, set_process_property};
