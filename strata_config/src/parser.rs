//! Pluggable document parsers and the extension table.
//!
//! Parsing is an external capability as far as the assembly pipeline is
//! concerned: the pipeline hands a parser the *expanded* text of a source
//! and receives a document tree back. The bundled parsers cover the formats
//! used across this workspace; callers register further formats through
//! [`ExtensionTable::register`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Failure produced by a [`DocumentParser`] for malformed input.
pub type ParseFailure = Box<dyn std::error::Error + Send + Sync>;

/// Parses expanded document text into a document tree.
pub trait DocumentParser: Send + Sync {
    /// Parse `text` into a tree of mappings, sequences, and scalars.
    ///
    /// # Errors
    ///
    /// Returns the underlying format error when `text` is malformed.
    fn parse(&self, text: &str) -> Result<Value, ParseFailure>;
}

/// TOML parser backed by the `toml` crate.
#[cfg(feature = "toml")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TomlParser;

#[cfg(feature = "toml")]
impl DocumentParser for TomlParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        let parsed: toml::Value = toml::from_str(text)?;
        Ok(serde_json::to_value(parsed)?)
    }
}

/// YAML parser backed by `serde_yaml`.
#[cfg(feature = "yaml")]
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlParser;

#[cfg(feature = "yaml")]
impl DocumentParser for YamlParser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// JSON and JSON5 parser backed by the `json5` crate.
#[cfg(feature = "json5")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Json5Parser;

#[cfg(feature = "json5")]
impl DocumentParser for Json5Parser {
    fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        Ok(json5::from_str(text)?)
    }
}

/// Mapping from file-extension strings to parsers.
///
/// The table is unordered: when two registered extensions produce documents
/// for the same profile and variant, their relative load order is
/// unspecified and must not be relied upon.
#[derive(Clone)]
pub struct ExtensionTable {
    parsers: HashMap<String, Arc<dyn DocumentParser>>,
}

impl ExtensionTable {
    /// Create a table with no registered extensions.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Create a table with the bundled parsers registered.
    ///
    /// Registers `toml`, `yaml`/`yml`, and `json`/`json5` according to the
    /// enabled features. Both JSON extensions map to the JSON5 parser, which
    /// accepts plain JSON.
    #[must_use]
    pub fn standard() -> Self {
        let mut table = Self::empty();
        #[cfg(feature = "toml")]
        table.register("toml", Arc::new(TomlParser));
        #[cfg(feature = "yaml")]
        {
            let yaml: Arc<dyn DocumentParser> = Arc::new(YamlParser);
            table.register("yaml", Arc::clone(&yaml));
            table.register("yml", yaml);
        }
        #[cfg(feature = "json5")]
        {
            let json5: Arc<dyn DocumentParser> = Arc::new(Json5Parser);
            table.register("json", Arc::clone(&json5));
            table.register("json5", json5);
        }
        table
    }

    /// Register a parser for `extension`, replacing any existing entry.
    pub fn register(&mut self, extension: impl Into<String>, parser: Arc<dyn DocumentParser>) {
        self.parsers.insert(extension.into(), parser);
    }

    /// Look up the parser registered for `extension`.
    #[must_use]
    pub fn parser_for(&self, extension: &str) -> Option<&Arc<dyn DocumentParser>> {
        self.parsers.get(extension)
    }

    /// Iterate the registered extensions, in unspecified order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.parsers.keys().map(String::as_str)
    }

    /// Whether the table has no registered extensions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl fmt::Debug for ExtensionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionTable")
            .field("extensions", &self.parsers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{DocumentParser, ExtensionTable, Json5Parser, TomlParser, YamlParser};

    #[test]
    fn standard_table_registers_bundled_formats() {
        let table = ExtensionTable::standard();
        for extension in ["toml", "yaml", "yml", "json", "json5"] {
            assert!(table.parser_for(extension).is_some(), "missing {extension}");
        }
    }

    #[test]
    fn toml_documents_become_trees() {
        let parsed = TomlParser.parse("[db]\nhost = \"x\"\nport = 1\n").expect("parse");
        assert_eq!(parsed, json!({"db": {"host": "x", "port": 1}}));
    }

    #[test]
    fn yaml_documents_become_trees() {
        let parsed = YamlParser.parse("web:\n  port: 8080\n").expect("parse");
        assert_eq!(parsed, json!({"web": {"port": 8080}}));
    }

    #[test]
    fn json_extension_accepts_plain_json() {
        let parsed = Json5Parser.parse(r#"{"web": {"port": 8080}}"#).expect("parse");
        assert_eq!(parsed, json!({"web": {"port": 8080}}));
    }

    #[test]
    fn malformed_input_is_reported() {
        assert!(YamlParser.parse("web: [unclosed").is_err());
        assert!(TomlParser.parse("= nonsense").is_err());
    }
}
