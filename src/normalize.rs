//! Turning raw, implementation-defined type names into readable ones.
//!
//! Two interchangeable [`NameNormalizer`]s exist. [`SymbolDemangler`] runs the
//! native demangler and is used whenever the `demangle` feature is compiled
//! in. [`QualifierStripper`] is the degraded path for builds without it: it
//! only removes qualifier keywords, so templated or operator names stay
//! partially mangled.

use crate::error::NormalizeError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Converts a raw type name into a readable one.
///
/// Normalization is total: a normalizer that cannot make sense of its input
/// returns it unchanged rather than failing.
pub trait NameNormalizer: Send + Sync + fmt::Debug {
    /// Returns the readable form of `raw`
    fn normalize(&self, raw: &str) -> String;

    /// Which strategy this normalizer implements
    fn kind(&self) -> NormalizerKind;
}

/// The available normalization strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NormalizerKind {
    /// Native symbol demangling, see [`SymbolDemangler`]
    Demangle,
    /// Qualifier keyword stripping, see [`QualifierStripper`]
    StripQualifiers,
}

impl NormalizerKind {
    /// Picks the best strategy this build supports
    pub fn detect() -> Self {
        if SymbolDemangler::is_available() {
            NormalizerKind::Demangle
        } else {
            NormalizerKind::StripQualifiers
        }
    }

    /// Builds a normalizer for this strategy.
    ///
    /// Asking for [`NormalizerKind::Demangle`] in a build without demangler
    /// support yields a [`QualifierStripper`] instead.
    pub fn build(self) -> Box<dyn NameNormalizer> {
        match self {
            NormalizerKind::Demangle if SymbolDemangler::is_available() => Box::new(SymbolDemangler),
            NormalizerKind::Demangle => {
                tracing::warn!("demangler not compiled in, stripping qualifiers instead");
                Box::new(QualifierStripper)
            }
            NormalizerKind::StripQualifiers => Box::new(QualifierStripper),
        }
    }
}

impl fmt::Display for NormalizerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NormalizerKind::Demangle => write!(f, "demangle"),
            NormalizerKind::StripQualifiers => write!(f, "strip"),
        }
    }
}

impl FromStr for NormalizerKind {
    type Err = crate::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demangle" => Ok(NormalizerKind::Demangle),
            "strip" | "strip-qualifiers" => Ok(NormalizerKind::StripQualifiers),
            other => Err(crate::ConfigError::InvalidNormalizer(other.to_string())),
        }
    }
}

/// Normalizer backed by the native Rust symbol demangler.
///
/// Understands both the legacy (`_ZN…E`) and v0 (`_R…`) manglings and drops
/// the trailing hash. Anything it does not recognize, including names that
/// are already readable, comes back unchanged.
///
/// # Examples
///
/// ```
/// use type_identity::{NameNormalizer, SymbolDemangler};
///
/// let demangler = SymbolDemangler;
/// # #[cfg(feature = "demangle")]
/// assert_eq!(demangler.normalize("_ZN3App8Services3BarE"), "App::Services::Bar");
/// assert_eq!(demangler.normalize("app::Foo"), "app::Foo");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SymbolDemangler;

impl SymbolDemangler {
    /// Returns true if demangler support was compiled in
    pub const fn is_available() -> bool {
        cfg!(feature = "demangle")
    }

    /// Demangles `raw`, reporting why when it cannot.
    #[cfg(feature = "demangle")]
    pub fn demangle(&self, raw: &str) -> Result<String, NormalizeError> {
        rustc_demangle::try_demangle(raw)
            .map(|symbol| format!("{:#}", symbol))
            .map_err(|_| NormalizeError::NotMangled(raw.to_string()))
    }

    /// Demangles `raw`, reporting why when it cannot.
    #[cfg(not(feature = "demangle"))]
    pub fn demangle(&self, _raw: &str) -> Result<String, NormalizeError> {
        Err(NormalizeError::Unavailable)
    }
}

impl NameNormalizer for SymbolDemangler {
    fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        match self.demangle(raw) {
            Ok(demangled) if !demangled.is_empty() => demangled,
            Ok(_) => raw.to_string(),
            Err(err) => {
                tracing::debug!(raw, %err, "keeping raw type name");
                raw.to_string()
            }
        }
    }

    fn kind(&self) -> NormalizerKind {
        NormalizerKind::Demangle
    }
}

// Applied in order; each removes the keyword together with its adjacent whitespace.
static QUALIFIER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["const", "volatile", "static", "class", "struct"]
        .iter()
        .map(|keyword| {
            Regex::new(&format!(r"\b{kw}\s+|\s+{kw}\b", kw = keyword))
                .expect("qualifier pattern is a valid regex")
        })
        .collect()
});

/// Best-effort normalizer that strips qualifier keywords.
///
/// Removes `const`, `volatile`, `static`, `class` and `struct` as whole
/// words. This tidies names in the `class App::Services::Bar` style but does
/// not demangle anything; a mangled symbol passes through as-is.
///
/// # Examples
///
/// ```
/// use type_identity::{NameNormalizer, QualifierStripper};
///
/// let stripper = QualifierStripper;
/// assert_eq!(stripper.normalize("class App::Services::Bar"), "App::Services::Bar");
/// assert_eq!(stripper.normalize("Foo const volatile"), "Foo");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct QualifierStripper;

impl NameNormalizer for QualifierStripper {
    fn normalize(&self, raw: &str) -> String {
        let stripped = QUALIFIER_PATTERNS
            .iter()
            .fold(raw.to_string(), |name, pattern| {
                pattern.replace_all(&name, "").into_owned()
            });

        // A name made only of qualifiers would vanish entirely.
        if stripped.trim().is_empty() && !raw.is_empty() {
            return raw.to_string();
        }
        stripped
    }

    fn kind(&self) -> NormalizerKind {
        NormalizerKind::StripQualifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stripper_removes_leading_keywords() {
        let stripper = QualifierStripper;
        assert_eq!(stripper.normalize("struct Foo"), "Foo");
        assert_eq!(stripper.normalize("const volatile Foo"), "Foo");
        assert_eq!(stripper.normalize("static class App::Widget"), "App::Widget");
    }

    #[test]
    fn test_stripper_removes_trailing_keywords() {
        let stripper = QualifierStripper;
        assert_eq!(stripper.normalize("Foo const"), "Foo");
        assert_eq!(stripper.normalize("Foo const *"), "Foo *");
    }

    #[test]
    fn test_stripper_handles_template_arguments() {
        let stripper = QualifierStripper;
        assert_eq!(
            stripper.normalize("class std::vector<struct Foo,class std::allocator<struct Foo> >"),
            "std::vector<Foo,std::allocator<Foo> >"
        );
    }

    #[test]
    fn test_stripper_only_matches_whole_words() {
        let stripper = QualifierStripper;
        assert_eq!(stripper.normalize("constant Foo"), "constant Foo");
        assert_eq!(stripper.normalize("my_struct Foo"), "my_struct Foo");
        assert_eq!(stripper.normalize("Foo classy"), "Foo classy");
        assert_eq!(stripper.normalize("app::Foo"), "app::Foo");
    }

    #[test]
    fn test_stripper_never_empties_a_name() {
        let stripper = QualifierStripper;
        assert_eq!(stripper.normalize(""), "");
        assert_eq!(stripper.normalize("const "), "const ");
        assert_eq!(stripper.normalize("const"), "const");
    }

    #[test]
    fn test_stripper_leaves_mangled_symbols_alone() {
        let stripper = QualifierStripper;
        assert_eq!(stripper.normalize("_ZN3App3FooE"), "_ZN3App3FooE");
    }

    #[cfg(feature = "demangle")]
    #[test]
    fn test_demangler_legacy_symbols() {
        let demangler = SymbolDemangler;
        assert_eq!(demangler.normalize("_ZN3FooE"), "Foo");
        assert_eq!(demangler.normalize("_ZN3App8Services3BarE"), "App::Services::Bar");
    }

    #[cfg(feature = "demangle")]
    #[test]
    fn test_demangler_drops_hash_suffix() {
        let demangler = SymbolDemangler;
        assert_eq!(demangler.normalize("_ZN3foo17h05af221e174051e9E"), "foo");
    }

    #[cfg(feature = "demangle")]
    #[test]
    fn test_demangler_v0_symbols() {
        let demangler = SymbolDemangler;
        assert_eq!(demangler.normalize("_RNvC6_123foo3bar"), "123foo::bar");
    }

    #[test]
    fn test_demangler_passes_readable_names_through() {
        let demangler = SymbolDemangler;
        assert_eq!(demangler.normalize(""), "");
        assert_eq!(demangler.normalize("Foo"), "Foo");
        assert_eq!(demangler.normalize("alloc::vec::Vec<u8>"), "alloc::vec::Vec<u8>");
    }

    #[cfg(feature = "demangle")]
    #[test]
    fn test_demangle_reports_unrecognized_input() {
        assert_eq!(
            SymbolDemangler.demangle("Foo"),
            Err(NormalizeError::NotMangled("Foo".to_string()))
        );
    }

    #[cfg(not(feature = "demangle"))]
    #[test]
    fn test_demangle_reports_missing_support() {
        assert_eq!(SymbolDemangler.demangle("_ZN3FooE"), Err(NormalizeError::Unavailable));
        assert_eq!(SymbolDemangler.normalize("_ZN3FooE"), "_ZN3FooE");
    }

    #[test]
    fn test_kind_round_trips_through_strings() {
        for kind in [NormalizerKind::Demangle, NormalizerKind::StripQualifiers] {
            assert_eq!(kind.to_string().parse::<NormalizerKind>(), Ok(kind));
        }
        assert_eq!(" Demangle ".parse::<NormalizerKind>(), Ok(NormalizerKind::Demangle));
        assert!(matches!(
            "itanium".parse::<NormalizerKind>(),
            Err(crate::ConfigError::InvalidNormalizer(name)) if name == "itanium"
        ));
    }

    #[test]
    fn test_build_matches_detected_capability() {
        assert_eq!(NormalizerKind::detect().build().kind(), NormalizerKind::detect());
        assert_eq!(
            NormalizerKind::StripQualifiers.build().kind(),
            NormalizerKind::StripQualifiers
        );
        let demangle = NormalizerKind::Demangle.build();
        if SymbolDemangler::is_available() {
            assert_eq!(demangle.kind(), NormalizerKind::Demangle);
        } else {
            assert_eq!(demangle.kind(), NormalizerKind::StripQualifiers);
        }
    }
}
