//! Textual expansion of `${NAME}` and `${NAME:default}` references.
//!
//! Expansion happens once, on the raw pre-parse text of a document, before
//! any structural parsing. References may therefore appear anywhere in the
//! document grammar: inside string literals, in numeric positions that rely
//! on string coercion, or in map keys.
//!
//! Matching is non-greedy and never nests: a reference closes at the first
//! `}` after its opener, and an opener followed by another `${` before any
//! `}` is emitted literally, with the inner occurrence matched instead.

use crate::error::StrataResult;
use crate::snapshot::EnvironmentSnapshot;

enum Scan {
    /// A complete reference: the inner content and the index after `}`.
    Closed { content: String, next: usize },
    /// Another `${` opened before the reference closed; the index of its `$`.
    Reopened { next: usize },
    /// The text ended before the reference closed.
    Unterminated,
}

fn scan_reference(chars: &[char], start: usize) -> Scan {
    let mut i = start;
    while let Some(&c) = chars.get(i) {
        match c {
            '}' => {
                let content = chars.get(start..i).unwrap_or(&[]).iter().collect();
                return Scan::Closed {
                    content,
                    next: i + 1,
                };
            }
            '$' if chars.get(i + 1) == Some(&'{') => return Scan::Reopened { next: i },
            _ => i += 1,
        }
    }
    Scan::Unterminated
}

/// Split reference content on the first `:` into a name and optional default.
fn split_reference(content: &str) -> (&str, Option<&str>) {
    content
        .split_once(':')
        .map_or((content, None), |(name, default)| (name, Some(default)))
}

/// Expand every property reference in `raw` against `snapshot`.
///
/// Text without references passes through unchanged, as do unterminated
/// openers. A present default (even the empty string) always satisfies a
/// missing property.
///
/// # Examples
///
/// ```
/// use strata_config::{EnvironmentSnapshot, expand};
///
/// let snapshot = EnvironmentSnapshot::synthetic().with_environment_var("DB_HOST", "prod");
/// let expanded = expand("jdbc://${DB_HOST}:${DB_PORT:5432}", &snapshot)?;
/// assert_eq!(expanded, "jdbc://prod:5432");
/// # Ok::<_, std::sync::Arc<strata_config::StrataError>>(())
/// ```
///
/// # Errors
///
/// Returns [`crate::StrataError::UnresolvedProperty`] when a reference names
/// an unknown property and supplies no default; the failure aborts expansion
/// of the whole text.
pub fn expand(raw: &str, snapshot: &EnvironmentSnapshot) -> StrataResult<String> {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while let Some(&c) = chars.get(i) {
        if c == '$' && chars.get(i + 1) == Some(&'{') {
            match scan_reference(&chars, i + 2) {
                Scan::Closed { content, next } => {
                    let (name, default) = split_reference(&content);
                    out.push_str(&snapshot.resolve(name, default, raw)?);
                    i = next;
                }
                Scan::Reopened { next } => {
                    out.extend(chars.get(i..next).unwrap_or(&[]));
                    i = next;
                }
                Scan::Unterminated => {
                    out.extend(chars.get(i..).unwrap_or(&[]));
                    break;
                }
            }
        } else {
            out.push(c);
            i += 1;
        }
    }
    Ok(out)
}
