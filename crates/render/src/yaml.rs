use crate::error::{ErrorKind, Result};
use crate::view::Report;
use crate::{RenderOptions, Writer};
use modlist_library::ScanResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl Writer for Yaml {
    fn name(&self) -> &'static str {
        "YAML"
    }

    fn extension(&self) -> &'static str {
        ".yaml"
    }

    fn render(&self, result: &ScanResult, options: &RenderOptions) -> Result<String> {
        let report = Report::new(result, options.include_errors);
        Ok(serde_yaml::to_string(&report).map_err(|e| ErrorKind::Serialize {
            format: "YAML",
            reason: e.to_string(),
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample;

    #[test]
    fn test_render() {
        let rendered = Yaml.render(&sample(), &RenderOptions::default()).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(value["total_mods"].as_u64(), Some(2));
        assert_eq!(value["mods"][1]["display_name"].as_str(), Some("Create | Kinetics"));
        assert_eq!(value["mods"][0]["description"].as_str(), Some("Item and recipe viewing, \"fast\"."));
        assert_eq!(value["errors"][0]["path"].as_str(), Some("mods/corrupt.jar"));
    }
}
