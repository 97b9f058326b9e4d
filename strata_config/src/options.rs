//! The assembly options record and its builder.

use std::collections::BTreeMap;
use std::sync::Arc;

use camino::Utf8PathBuf;
use serde_json::{Map, Value};

use crate::enumerate::{DashJoinedTemplate, PathTemplate};
use crate::parser::{DocumentParser, ExtensionTable};

/// Options recognised by one assembly run.
///
/// Construct through [`AssemblyOptions::builder`]; only the resource prefix
/// is required. Defaults: no profiles beyond the implicit nil profile,
/// variants `[nil, "local"]`, the standard extension table, and the
/// dash-joined path template.
#[derive(Clone, Debug)]
pub struct AssemblyOptions {
    pub(crate) prefix: String,
    pub(crate) schemas: Vec<Value>,
    pub(crate) overrides: Option<Map<String, Value>>,
    pub(crate) profiles: Vec<Option<String>>,
    pub(crate) variants: Vec<Option<String>>,
    pub(crate) template: Arc<dyn PathTemplate>,
    pub(crate) extensions: ExtensionTable,
    pub(crate) additional_files: Vec<Utf8PathBuf>,
    pub(crate) args: Vec<String>,
    pub(crate) properties: BTreeMap<String, String>,
}

impl AssemblyOptions {
    /// Start building options for resources named under `prefix`.
    #[must_use]
    pub fn builder(prefix: impl Into<String>) -> AssemblyOptionsBuilder {
        AssemblyOptionsBuilder::new(prefix)
    }
}

/// Builder for [`AssemblyOptions`].
///
/// # Examples
///
/// ```
/// use strata_config::AssemblyOptions;
///
/// let options = AssemblyOptions::builder("app")
///     .profile("web")
///     .variant("production")
///     .property("DB_HOST", "localhost")
///     .build();
/// let _ = options;
/// ```
#[derive(Debug)]
pub struct AssemblyOptionsBuilder {
    prefix: String,
    schemas: Vec<Value>,
    overrides: Option<Map<String, Value>>,
    profiles: Vec<Option<String>>,
    variants: Option<Vec<Option<String>>>,
    template: Arc<dyn PathTemplate>,
    extensions: ExtensionTable,
    additional_files: Vec<Utf8PathBuf>,
    args: Vec<String>,
    properties: BTreeMap<String, String>,
}

impl AssemblyOptionsBuilder {
    fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            schemas: Vec::new(),
            overrides: None,
            profiles: Vec::new(),
            variants: None,
            template: Arc::new(DashJoinedTemplate),
            extensions: ExtensionTable::standard(),
            additional_files: Vec::new(),
            args: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Contribute a schema fragment; fragments deep-merge at validation.
    #[must_use]
    pub fn schema(mut self, fragment: Value) -> Self {
        self.schemas.push(fragment);
        self
    }

    /// Set the explicit override map (merged above every file layer).
    #[must_use]
    pub fn overrides(mut self, overrides: Map<String, Value>) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Append a named profile; the nil profile is always appended last.
    #[must_use]
    pub fn profile(mut self, name: impl Into<String>) -> Self {
        self.profiles.push(Some(name.into()));
        self
    }

    /// Append several named profiles, in iteration order.
    #[must_use]
    pub fn profiles<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles
            .extend(names.into_iter().map(|name| Some(name.into())));
        self
    }

    /// Append a named variant, replacing the default `[nil, "local"]` list.
    #[must_use]
    pub fn variant(mut self, name: impl Into<String>) -> Self {
        self.variants
            .get_or_insert_with(Vec::new)
            .push(Some(name.into()));
        self
    }

    /// Append the nil (base) variant, replacing the default list.
    #[must_use]
    pub fn base_variant(mut self) -> Self {
        self.variants.get_or_insert_with(Vec::new).push(None);
        self
    }

    /// Replace the resource path template.
    #[must_use]
    pub fn path_template(mut self, template: impl PathTemplate + 'static) -> Self {
        self.template = Arc::new(template);
        self
    }

    /// Register an additional extension parser.
    #[must_use]
    pub fn extension(
        mut self,
        extension: impl Into<String>,
        parser: Arc<dyn DocumentParser>,
    ) -> Self {
        self.extensions.register(extension, parser);
        self
    }

    /// Replace the extension table wholesale.
    #[must_use]
    pub fn extension_table(mut self, table: ExtensionTable) -> Self {
        self.extensions = table;
        self
    }

    /// Queue an additional configuration file, loaded above the enumerated
    /// layers.
    #[must_use]
    pub fn additional_file(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.additional_files.push(path.into());
        self
    }

    /// Supply the raw command-line token list.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Supply an explicit property (highest-precedence expansion source).
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Finalise the options record.
    #[must_use]
    pub fn build(self) -> AssemblyOptions {
        AssemblyOptions {
            prefix: self.prefix,
            schemas: self.schemas,
            overrides: self.overrides,
            profiles: self.profiles,
            variants: self
                .variants
                .unwrap_or_else(|| vec![None, Some(String::from("local"))]),
            template: self.template,
            extensions: self.extensions,
            additional_files: self.additional_files,
            args: self.args,
            properties: self.properties,
        }
    }
}
