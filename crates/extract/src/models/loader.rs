use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use super::sanitize;
use crate::error::{Error, ErrorKind};

/// The mod-loading runtime an archive targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Loader {
    /// Fabric (`fabric.mod.json`)
    Fabric,
    /// Forge, both `META-INF/mods.toml` and legacy `mcmod.info`
    Forge,
    /// NeoForge, sharing the `mods.toml` descriptor shape with Forge
    NeoForge,
    /// Quilt (`quilt.mod.json`)
    Quilt,
    /// No descriptor was recognised
    #[default]
    Unknown,
}
impl Loader {
    /// All loaders, in extractor priority order with [`Unknown`](Self::Unknown) last.
    pub const ALL: [Loader; 5] = [Loader::Fabric, Loader::Quilt, Loader::Forge, Loader::NeoForge, Loader::Unknown];

    /// Returns the lower-case identifier used in output and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Loader::Fabric => "fabric",
            Loader::Forge => "forge",
            Loader::NeoForge => "neoforge",
            Loader::Quilt => "quilt",
            Loader::Unknown => "unknown",
        }
    }

    /// Returns the capitalised name for human-facing summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            Loader::Fabric => "Fabric",
            Loader::Forge => "Forge",
            Loader::NeoForge => "NeoForge",
            Loader::Quilt => "Quilt",
            Loader::Unknown => "Unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Loader::Unknown)
    }
}
impl TryFrom<String> for Loader {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.as_str().parse()
    }
}
impl FromStr for Loader {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sanitized = sanitize(s);
        Ok(match sanitized.as_str() {
            "fabric" => Self::Fabric,
            "forge" | "minecraftforge" | "legacyforge" => Self::Forge,
            "neoforge" | "neoforged" => Self::NeoForge,
            "quilt" => Self::Quilt,
            "unknown" => Self::Unknown,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "loader",
                value: format!("unknown loader: {}", s)
            }),
        })
    }
}

impl Display for Loader {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
