use crate::normalize::NameNormalizer;

/// The scope separator emitted by compilers
pub const SCOPE_SEPARATOR: &str = "::";

/// The portable separator used in canonical names
pub const CANONICAL_SEPARATOR: &str = ".";

/// Rewrites every `::` in `name` as `.`.
///
/// # Examples
///
/// ```
/// use type_identity::canonicalize;
///
/// assert_eq!(canonicalize("App::Services::Bar"), "App.Services.Bar");
/// assert_eq!(canonicalize("Foo"), "Foo");
/// ```
pub fn canonicalize(name: &str) -> String {
    name.replace(SCOPE_SEPARATOR, CANONICAL_SEPARATOR)
}

/// Runs a raw name through `normalizer` and then [`canonicalize`].
pub fn canonical_name(raw: &str, normalizer: &dyn NameNormalizer) -> String {
    canonicalize(&normalizer.normalize(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::QualifierStripper;

    #[test]
    fn test_canonicalize_nested_generics() {
        assert_eq!(
            canonicalize("alloc::vec::Vec<core::option::Option<app::Foo>>"),
            "alloc.vec.Vec<core.option.Option<app.Foo>>"
        );
    }

    #[test]
    fn test_canonicalize_odd_colon_runs() {
        assert_eq!(canonicalize(":::"), ".:");
        assert_eq!(canonicalize("a::::b"), "a..b");
        assert_eq!(canonicalize("a:b"), "a:b");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_canonical_name_normalizes_first() {
        assert_eq!(
            canonical_name("class App::Services::Bar", &QualifierStripper),
            "App.Services.Bar"
        );
    }
}
