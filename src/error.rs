use thiserror::Error;

/// Why a normalizer could not produce a demangled name.
///
/// These never escape a [`NameNormalizer`](crate::NameNormalizer): the
/// normalizer logs them and falls back to the raw name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The crate was built without the `demangle` feature
    #[error("symbol demangling is not available in this build")]
    Unavailable,
    /// The input is not in any mangling scheme the demangler recognizes
    #[error("'{0}' is not a recognized mangled symbol")]
    NotMangled(String),
}

/// Errors produced while reading registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The normalizer name is neither `demangle` nor `strip`
    #[error("unknown normalizer '{0}', expected 'demangle' or 'strip'")]
    InvalidNormalizer(String),
    /// The environment variable holds bytes that are not valid UTF-8
    #[error("environment variable {0} is not valid unicode")]
    NotUnicode(&'static str),
}
