//! Environment snapshots and dynamic property resolution.
//!
//! An [`EnvironmentSnapshot`] is captured once at the start of an assembly
//! run and threaded explicitly through expansion, so a run observes a single
//! consistent view of process-wide state. Lookup precedence, highest first:
//! explicit caller-supplied properties, process-wide properties, environment
//! variables. Keys are compared by exact string identity with no
//! case-folding.

use std::collections::BTreeMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use crate::error::{StrataError, StrataResult};

static PROCESS_PROPERTIES: LazyLock<RwLock<BTreeMap<String, String>>> =
    LazyLock::new(RwLock::default);

/// Set a process-wide property, returning the prior value if any.
///
/// Embedders seed these during bootstrap, before the first assembly run.
/// Snapshots read the store exactly once per capture; mutations after a
/// capture are not observed by it.
pub fn set_process_property(name: impl Into<String>, value: impl Into<String>) -> Option<String> {
    PROCESS_PROPERTIES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.into(), value.into())
}

/// Remove a process-wide property, returning the removed value if any.
pub fn remove_process_property(name: &str) -> Option<String> {
    PROCESS_PROPERTIES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(name)
}

/// Immutable view of dynamic property sources for one assembly run.
#[derive(Clone, Debug, Default)]
pub struct EnvironmentSnapshot {
    environment: BTreeMap<String, String>,
    process: BTreeMap<String, String>,
    explicit: BTreeMap<String, String>,
}

impl EnvironmentSnapshot {
    /// Capture the process environment, the process-wide property store, and
    /// the supplied explicit properties.
    ///
    /// Environment variables whose name or value is not valid UTF-8 are
    /// skipped; property references cannot name them anyway.
    #[must_use]
    pub fn capture<I, K, V>(explicit: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let environment = std::env::vars().collect();
        let process = PROCESS_PROPERTIES
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let explicit = explicit
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            environment,
            process,
            explicit,
        }
    }

    /// Construct an empty snapshot for tests and embedding scenarios that
    /// must not observe real process state.
    #[must_use]
    pub fn synthetic() -> Self {
        Self::default()
    }

    /// Add an environment-variable entry (lowest precedence).
    #[must_use]
    pub fn with_environment_var(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment.insert(name.into(), value.into());
        self
    }

    /// Add a process-wide property entry (middle precedence).
    #[must_use]
    pub fn with_process_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.process.insert(name.into(), value.into());
        self
    }

    /// Add an explicit property entry (highest precedence).
    #[must_use]
    pub fn with_explicit_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.explicit.insert(name.into(), value.into());
        self
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        self.explicit
            .get(name)
            .or_else(|| self.process.get(name))
            .or_else(|| self.environment.get(name))
            .map(String::as_str)
    }

    /// Every key visible to this snapshot, de-duplicated across tiers.
    #[must_use]
    pub fn known_keys(&self) -> Vec<String> {
        let mut keys: BTreeMap<&str, ()> = BTreeMap::new();
        for key in self
            .environment
            .keys()
            .chain(self.process.keys())
            .chain(self.explicit.keys())
        {
            keys.insert(key, ());
        }
        keys.into_keys().map(str::to_owned).collect()
    }

    /// Resolve a property reference.
    ///
    /// A present default (even the empty string) is always a legal fallback.
    /// `source_text` is the raw text the reference appeared in and is carried
    /// on the failure for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::UnresolvedProperty`] when the name is unknown
    /// to every tier and no default was supplied.
    pub fn resolve(
        &self,
        name: &str,
        default: Option<&str>,
        source_text: &str,
    ) -> StrataResult<String> {
        if let Some(value) = self.lookup(name) {
            return Ok(value.to_owned());
        }
        match default {
            Some(fallback) => Ok(fallback.to_owned()),
            None => Err(StrataError::unresolved_property(
                name,
                self.known_keys(),
                source_text,
            )
            .into_shared()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::{EnvironmentSnapshot, remove_process_property, set_process_property};
    use crate::error::StrataError;

    #[test]
    fn explicit_shadows_process_shadows_environment() {
        let snapshot = EnvironmentSnapshot::synthetic()
            .with_environment_var("TIER", "env")
            .with_process_property("TIER", "process")
            .with_explicit_property("TIER", "explicit");
        let value = snapshot.resolve("TIER", None, "${TIER}").expect("resolve");
        assert_eq!(value, "explicit");
    }

    #[test]
    fn process_shadows_environment() {
        let snapshot = EnvironmentSnapshot::synthetic()
            .with_environment_var("TIER", "env")
            .with_process_property("TIER", "process");
        let value = snapshot.resolve("TIER", None, "${TIER}").expect("resolve");
        assert_eq!(value, "process");
    }

    #[test]
    fn empty_default_is_a_legal_fallback() {
        let snapshot = EnvironmentSnapshot::synthetic();
        let value = snapshot.resolve("MISSING", Some(""), "${MISSING:}").expect("resolve");
        assert_eq!(value, "");
    }

    #[test]
    fn missing_key_without_default_carries_known_keys() {
        let snapshot = EnvironmentSnapshot::synthetic().with_environment_var("PRESENT", "1");
        let err = snapshot
            .resolve("MISSING", None, "${MISSING}")
            .expect_err("unresolved");
        match &*err {
            StrataError::UnresolvedProperty(details) => {
                assert_eq!(details.name, "MISSING");
                assert_eq!(details.source_text, "${MISSING}");
                assert!(details.known_keys.contains(&String::from("PRESENT")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn keys_are_matched_by_exact_identity() {
        let snapshot = EnvironmentSnapshot::synthetic().with_environment_var("db_host", "x");
        assert!(snapshot.resolve("DB_HOST", None, "${DB_HOST}").is_err());
    }

    #[test]
    #[serial]
    fn capture_reads_the_process_property_store_once() {
        let prior = set_process_property("strata.test.tier", "captured");
        let snapshot = EnvironmentSnapshot::capture::<_, String, String>([]);
        remove_process_property("strata.test.tier");
        let value = snapshot
            .resolve("strata.test.tier", None, "${strata.test.tier}")
            .expect("resolve");
        assert_eq!(value, "captured");
        if let Some(value) = prior {
            set_process_property("strata.test.tier", value);
        }
    }
}
