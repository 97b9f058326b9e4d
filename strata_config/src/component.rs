//! Component configuration seam.
//!
//! The lifecycle framework that owns components is an external collaborator;
//! the assembler only depends on the ability to hand a component its slice
//! of the assembled configuration.

use serde_json::Value;

use crate::error::StrataResult;

/// Capability of receiving a slice of assembled configuration.
pub trait Configurable {
    /// Apply the given configuration slice to this component.
    ///
    /// # Errors
    ///
    /// Implementations surface their own failures as shared
    /// [`crate::StrataError`] values.
    fn configure(&mut self, configuration: &Value) -> StrataResult<()>;
}

/// Select the configuration slice for a profile.
///
/// A named profile selects the identically-named top-level key; the nil
/// profile receives the whole mapping.
#[must_use]
pub fn slice_for_profile<'a>(configuration: &'a Value, profile: Option<&str>) -> Option<&'a Value> {
    match profile {
        Some(name) => configuration.get(name),
        None => Some(configuration),
    }
}

/// Hand each component the slice named by its profile.
///
/// Components whose profile has no slice in `configuration` are skipped.
///
/// # Errors
///
/// Propagates the first failure reported by a component.
pub fn configure_components<'a, I>(configuration: &Value, components: I) -> StrataResult<()>
where
    I: IntoIterator<Item = (Option<&'a str>, &'a mut dyn Configurable)>,
{
    for (profile, component) in components {
        if let Some(slice) = slice_for_profile(configuration, profile) {
            component.configure(slice)?;
        }
    }
    Ok(())
}
