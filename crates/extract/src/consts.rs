use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// A `major.minor[.patch]` token anywhere in a version constraint.
regex!(VERSION_TOKEN_REGEX, r"\d+\.\d+(?:\.\d+)?");
// Build-time substitution left unexpanded, eg. `${file.jarVersion}`.
regex!(PLACEHOLDER_REGEX, r"^\$\{[^}]*\}$");

pub(crate) const FABRIC_DESCRIPTOR: &str = "fabric.mod.json";
pub(crate) const QUILT_DESCRIPTOR: &str = "quilt.mod.json";
pub(crate) const NEOFORGE_TOML_DESCRIPTOR: &str = "META-INF/neoforge.mods.toml";
pub(crate) const FORGE_TOML_DESCRIPTOR: &str = "META-INF/mods.toml";
pub(crate) const MCMOD_INFO_DESCRIPTOR: &str = "mcmod.info";

pub(crate) const NEOFORGE_ID: &str = "neoforge";
pub(crate) const FORGE_ID: &str = "forge";
pub(crate) const MINECRAFT_ID: &str = "minecraft";

/// Version reported when nothing better is known.
pub const UNKNOWN_VERSION: &str = "Unknown";
