use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all modplan operations.
///
/// Structural findings (cycles, version conflicts, missing dependencies)
/// are never errors; they are result fields. This type covers only fatal
/// conditions that prevent an analysis from producing a graph at all.
#[derive(Debug, Error, Diagnostic)]
pub enum ModplanError {
    /// Invalid or malformed mod list input.
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check that the input is a mod list, a `files` array, or a `mods` array"))]
    Manifest { message: String },

    /// Dependency analysis failed before producing a result.
    #[error("Dependency analysis failed: {message}")]
    Analysis { message: String },

    /// Conflict detection failed before producing a result.
    #[error("Conflict detection failed: {message}")]
    Conflict { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type ModplanResult<T> = miette::Result<T>;
