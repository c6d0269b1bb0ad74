use crate::error::ConfigError;
use crate::normalize::{NameNormalizer, NormalizerKind};
use once_cell::sync::Lazy;
use std::env::{self, VarError};
use std::sync::Arc;

/// Environment variable that selects the process default normalizer
pub const NORMALIZER_ENV: &str = "TYPE_IDENTITY_NORMALIZER";

/// Settings for a [`TypeIdentityRegistry`](crate::TypeIdentityRegistry)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    pub normalizer: NormalizerKind,
}

impl RegistryConfig {
    /// Reads the configuration from [`NORMALIZER_ENV`].
    ///
    /// An unset variable gives the [`Default`] configuration.
    ///
    /// # Errors
    ///
    /// - Returns `ConfigError::InvalidNormalizer` if the value names no known normalizer
    /// - Returns `ConfigError::NotUnicode` if the value is not valid unicode
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(NORMALIZER_ENV) {
            Ok(value) => Ok(Self {
                normalizer: value.parse()?,
            }),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(NORMALIZER_ENV)),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerKind::detect(),
        }
    }
}

static DEFAULT_NORMALIZER: Lazy<Arc<dyn NameNormalizer>> = Lazy::new(|| {
    let config = RegistryConfig::from_env().unwrap_or_else(|err| {
        tracing::warn!(%err, "ignoring invalid normalizer configuration");
        RegistryConfig::default()
    });
    tracing::debug!(normalizer = %config.normalizer, "selected default type name normalizer");
    Arc::from(config.normalizer.build())
});

/// The normalizer used when none is given explicitly.
///
/// Chosen once per process, from [`NORMALIZER_ENV`] if it is set and valid,
/// otherwise by [`NormalizerKind::detect`].
pub fn default_normalizer() -> Arc<dyn NameNormalizer> {
    Arc::clone(&DEFAULT_NORMALIZER)
}
