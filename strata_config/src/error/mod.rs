//! Error types produced by the configuration assembler.

mod constructors;
mod types;

pub use types::{
    DocumentParse, InvalidConfiguration, StrataError, UnresolvedProperty, ValueKind,
};

/// Convenient alias for results carrying a shared [`StrataError`].
///
/// Errors are reference counted so that a single failure can be surfaced to
/// several observers (for example, a bootstrap log and the propagated result)
/// without cloning the payload, which may embed the full merged document.
pub type StrataResult<T> = Result<T, std::sync::Arc<StrataError>>;

#[cfg(test)]
mod tests;
