//! Detection of archives switched off by renaming them with an inert suffix.
//!
//! Launchers disable a mod by renaming `foo.jar` to `foo.jar.disabled`. The
//! content is untouched, so a disabled archive is identified exactly like its
//! enabled counterpart once the suffix has been stripped.

use std::path::Path;

/// Suffix appended to a disabled archive's file name.
pub const DISABLED_SUFFIX: &str = ".disabled";

/// Splits a file name into the name used for identification and whether the
/// disabled suffix was present. Matching is case-insensitive.
///
/// ```
/// use modlist_archive::disabled::split;
/// assert_eq!(split("sodium.jar.disabled"), ("sodium.jar", true));
/// assert_eq!(split("sodium.jar"), ("sodium.jar", false));
/// ```
#[must_use]
pub fn split(file_name: &str) -> (&str, bool) {
    let Some(cut) = file_name.len().checked_sub(DISABLED_SUFFIX.len()) else {
        return (file_name, false);
    };
    match (file_name.get(..cut), file_name.get(cut..)) {
        (Some(stem), Some(suffix)) if !stem.is_empty() && suffix.eq_ignore_ascii_case(DISABLED_SUFFIX) => {
            (stem, true)
        },
        _ => (file_name, false),
    }
}

/// Returns `true` if the path's file name carries the disabled suffix.
#[must_use]
pub fn is_disabled(path: impl AsRef<Path>) -> bool {
    path.as_ref().file_name().and_then(|name| name.to_str()).is_some_and(|name| split(name).1)
}

/// File name used to identify an archive: the on-disk name without the
/// disabled suffix. Non-UTF-8 names are converted lossily.
#[must_use]
pub fn identification_name(path: impl AsRef<Path>) -> String {
    let name = path.as_ref().file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    split(&name).0.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("create.jar", "create.jar", false)]
    #[case("create.jar.disabled", "create.jar", true)]
    #[case("create.jar.DISABLED", "create.jar", true)]
    #[case(".disabled", ".disabled", false)]
    #[case("disabled", "disabled", false)]
    #[case("", "", false)]
    fn test_split(#[case] input: &str, #[case] stem: &str, #[case] disabled: bool) {
        assert_eq!(split(input), (stem, disabled));
    }

    #[test]
    fn test_identification_name() {
        assert_eq!(identification_name("mods/jei-1.20.1.jar.disabled"), "jei-1.20.1.jar");
        assert!(is_disabled("mods/jei-1.20.1.jar.disabled"));
        assert!(!is_disabled("mods/jei-1.20.1.jar"));
    }
}
