//! Deterministic enumeration of logical resource names.
//!
//! Enumeration iterates profiles in caller order with the nil profile
//! appended last when absent, variants likewise per profile, and the
//! extension table innermost. One candidate is produced per
//! (profile, variant, extension) triple whether or not a matching resource
//! exists; existence is the loader's concern. The resulting order is fully
//! deterministic except for extension iteration, which follows the
//! unordered table.

use crate::parser::ExtensionTable;

/// Computes the logical resource name for one enumeration entry.
pub trait PathTemplate: Send + Sync {
    /// Produce the logical name for a (prefix, profile, variant, extension)
    /// combination.
    fn logical_name(
        &self,
        prefix: &str,
        profile: Option<&str>,
        variant: Option<&str>,
        extension: &str,
    ) -> String;
}

impl std::fmt::Debug for dyn PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PathTemplate")
    }
}

/// Default template: non-nil segments joined with `-`, a fixed
/// `configuration` suffix segment, then the extension.
///
/// # Examples
///
/// ```
/// use strata_config::{DashJoinedTemplate, PathTemplate};
///
/// let template = DashJoinedTemplate;
/// assert_eq!(
///     template.logical_name("app", Some("web"), Some("local"), "yaml"),
///     "app-web-local-configuration.yaml",
/// );
/// assert_eq!(
///     template.logical_name("app", None, None, "yaml"),
///     "app-configuration.yaml",
/// );
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct DashJoinedTemplate;

impl PathTemplate for DashJoinedTemplate {
    fn logical_name(
        &self,
        prefix: &str,
        profile: Option<&str>,
        variant: Option<&str>,
        extension: &str,
    ) -> String {
        let mut segments = vec![prefix];
        segments.extend(profile);
        segments.extend(variant);
        segments.push("configuration");
        let mut name = segments.join("-");
        name.push('.');
        name.push_str(extension);
        name
    }
}

/// One entry of the enumeration: the triple it was derived from and the
/// logical name the template produced for it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResourceCandidate {
    /// Profile segment, `None` for the global layer.
    pub profile: Option<String>,
    /// Variant segment, `None` for the base overlay.
    pub variant: Option<String>,
    /// File extension selecting the parser.
    pub extension: String,
    /// Logical name to resolve against the resource repository.
    pub logical_name: String,
}

fn with_nil_appended(list: &[Option<String>]) -> Vec<Option<String>> {
    let mut out = list.to_vec();
    if !out.iter().any(Option::is_none) {
        out.push(None);
    }
    out
}

/// Enumerate the ordered candidate list for an assembly run.
///
/// The nil profile and nil variant are always included, appended last when
/// the caller-supplied lists omit them.
#[must_use]
pub fn enumerate(
    prefix: &str,
    profiles: &[Option<String>],
    variants: &[Option<String>],
    extensions: &ExtensionTable,
    template: &dyn PathTemplate,
) -> Vec<ResourceCandidate> {
    let profiles = with_nil_appended(profiles);
    let variants = with_nil_appended(variants);
    let mut candidates = Vec::new();
    for profile in &profiles {
        for variant in &variants {
            for extension in extensions.extensions() {
                let logical_name = template.logical_name(
                    prefix,
                    profile.as_deref(),
                    variant.as_deref(),
                    extension,
                );
                candidates.push(ResourceCandidate {
                    profile: profile.clone(),
                    variant: variant.clone(),
                    extension: extension.to_owned(),
                    logical_name,
                });
            }
        }
    }
    candidates
}
