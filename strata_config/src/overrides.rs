//! Parsing of command-line override tokens.
//!
//! Two token grammars are recognised: `--load <path>`, which queues an
//! additional configuration file, and `<slash/delimited/path>=<value>`,
//! which sets a raw string into the override mapping. Any other token is a
//! hard parse error.

use camino::Utf8PathBuf;
use serde_json::{Map, Value};

use crate::error::{StrataError, StrataResult};

/// Result of parsing a raw argument list.
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    /// Paths collected from `--load` tokens, in encounter order.
    pub additional_files: Vec<Utf8PathBuf>,
    /// Override mapping built from `key=value` tokens.
    ///
    /// Values are stored as raw strings; coercion happens later against the
    /// schema. Identical paths across tokens overwrite, last token wins.
    pub overrides: Value,
}

fn invalid(token: &str) -> std::sync::Arc<StrataError> {
    StrataError::InvalidArgument {
        token: token.to_owned(),
    }
    .into_shared()
}

/// Set `value` at the mapping path named by `segments`.
///
/// Intermediate mappings are created on demand; an intermediate value that
/// is not a mapping is displaced by a fresh one, so a later deeper path can
/// always be set.
fn assoc_at_path(target: &mut Value, segments: &[&str], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut cursor = target;
    for segment in parents {
        if !cursor.is_object() {
            *cursor = Value::Object(Map::new());
        }
        let Some(map) = cursor.as_object_mut() else {
            return;
        };
        cursor = map
            .entry((*segment).to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    if !cursor.is_object() {
        *cursor = Value::Object(Map::new());
    }
    if let Some(map) = cursor.as_object_mut() {
        map.insert((*last).to_owned(), value);
    }
}

/// Parse a flat argument list into additional files and an override mapping.
///
/// Tokens are consumed left to right. `--load` consumes the following token
/// as a file path. Every other token must contain `=`; the key portion
/// splits on `/` into path segments and the value portion is kept verbatim
/// (everything after the first `=`).
///
/// # Examples
///
/// ```
/// use strata_config::parse_cli_overrides;
///
/// let parsed = parse_cli_overrides(["--load", "extra.yaml", "web/port=7777"])?;
/// assert_eq!(parsed.additional_files, vec![camino::Utf8PathBuf::from("extra.yaml")]);
/// assert_eq!(parsed.overrides, serde_json::json!({"web": {"port": "7777"}}));
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
///
/// # Errors
///
/// Returns [`StrataError::InvalidArgument`] for a token matching neither
/// grammar, for `--load` with no following token, and for an empty key or
/// empty path segment.
pub fn parse_cli_overrides<I, S>(args: I) -> StrataResult<CliOverrides>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut additional_files = Vec::new();
    let mut overrides = Value::Object(Map::new());
    let mut tokens = args.into_iter();
    while let Some(raw) = tokens.next() {
        let token = raw.as_ref();
        if token == "--load" {
            match tokens.next() {
                Some(path) => additional_files.push(Utf8PathBuf::from(path.as_ref())),
                None => return Err(invalid(token)),
            }
            continue;
        }
        let Some((key, value)) = token.split_once('=') else {
            return Err(invalid(token));
        };
        if key.is_empty() {
            return Err(invalid(token));
        }
        let segments: Vec<&str> = key.split('/').collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(invalid(token));
        }
        assoc_at_path(&mut overrides, &segments, Value::String(value.to_owned()));
    }
    Ok(CliOverrides {
        additional_files,
        overrides,
    })
}
