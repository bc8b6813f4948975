use crate::Config;
use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "MODLIST_";
const FILE_NAMES: [&str; 4] = ["modlist.toml", "modlist.yaml", "modlist.yml", "modlist.json"];

/// Builds a [`Config`] from layered sources. See the crate docs for the order.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    /// Defaults, then `file` (or the default config file, if any), then the
    /// environment.
    ///
    /// # Errors
    ///
    /// - [`NotFound`](ErrorKind::NotFound) if `file` is given but missing.
    /// - [`UnsupportedFile`](ErrorKind::UnsupportedFile) if its extension
    ///   isn't recognised.
    pub fn new(file: Option<&Path>) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()));
        let figment = match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => with_file(figment, path)?,
            None => match default_file() {
                Some(path) => with_file(figment, &path)?,
                None => figment,
            },
        };
        Ok(Self {
            figment: figment.merge(Env::prefixed(ENV_PREFIX).split("__")),
        })
    }

    /// Override a single dotted key (eg. `scan.workers`) on top of every
    /// other source.
    pub fn set(self, key: &str, value: impl Serialize) -> Self {
        Self {
            figment: self.figment.merge(Serialized::default(key, value)),
        }
    }

    /// Merge, deserialise and validate.
    ///
    /// # Errors
    ///
    /// - [`Parse`](ErrorKind::Parse) if a source is malformed.
    /// - Anything [`Config::validate`] rejects.
    pub fn load(self) -> Result<Config> {
        let config: Config = self.figment.extract().map_err(|e| ErrorKind::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

fn with_file(figment: Figment, path: &Path) -> Result<Figment> {
    debug!(path = %path.display(), "reading config file");
    let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase);
    Ok(match extension.as_deref() {
        Some("toml") => figment.merge(Toml::file(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        _ => exn::bail!(ErrorKind::UnsupportedFile(path.to_path_buf())),
    })
}

/// The first `modlist.{toml,yaml,yml,json}` that exists in the platform
/// config directory (eg. `~/.config/modlist` on Linux).
pub fn default_file() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "modlist")?;
    FILE_NAMES.iter().map(|name| dirs.config_dir().join(name)).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_file_then_env_then_overrides() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "custom.toml",
                r#"
                [scan]
                workers = 2
                recursive = true
                exclude = ["optifine*"]

                [output]
                format = "md"
                "#,
            )?;
            jail.set_env("MODLIST_SCAN__WORKERS", "6");
            jail.set_env("MODLIST_OUTPUT__COMPACT", "true");

            let config = ConfigLoader::new(Some(Path::new("custom.toml"))).unwrap().load().unwrap();
            assert_eq!(config.scan.workers, 6);
            assert!(config.scan.recursive);
            assert_eq!(config.scan.exclude, ["optifine*"]);
            assert_eq!(config.output.format, "md");
            assert!(config.output.compact);

            let config = ConfigLoader::new(Some(Path::new("custom.toml")))
                .unwrap()
                .set("scan.workers", 12)
                .set("output.format", "csv")
                .load()
                .unwrap();
            assert_eq!(config.scan.workers, 12);
            assert_eq!(config.output.format, "csv");
            Ok(())
        });
    }

    #[test]
    fn test_yaml_and_json_files() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("modlist.yaml", "process:\n  dedup: true\n  sort_by: name\n")?;
            jail.create_file("modlist.json", r#"{"log": {"level": "debug"}}"#)?;
            let yaml = ConfigLoader::new(Some(Path::new("modlist.yaml"))).unwrap().load().unwrap();
            assert!(yaml.process.dedup);
            assert_eq!(yaml.process.sort_by.as_deref(), Some("name"));
            let json = ConfigLoader::new(Some(Path::new("modlist.json"))).unwrap().load().unwrap();
            assert_eq!(json.log.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_rejected() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file("zero.toml", "[scan]\nworkers = 0\n")?;
            let err = ConfigLoader::new(Some(Path::new("zero.toml"))).unwrap().load().unwrap_err();
            assert!(matches!(*err, ErrorKind::InvalidValue { field: "scan.workers", .. }));

            jail.create_file("wrong.toml", "[scan]\nworkers = \"many\"\n")?;
            let err = ConfigLoader::new(Some(Path::new("wrong.toml"))).unwrap().load().unwrap_err();
            assert!(matches!(*err, ErrorKind::Parse(_)));
            Ok(())
        });
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let err = ConfigLoader::new(Some(Path::new("missing.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::NotFound(PathBuf::from("missing.toml")));
            jail.create_file("modlist.ini", "workers=2")?;
            let err = ConfigLoader::new(Some(Path::new("modlist.ini"))).unwrap_err();
            assert_eq!(*err, ErrorKind::UnsupportedFile(PathBuf::from("modlist.ini")));
            Ok(())
        });
    }
}
