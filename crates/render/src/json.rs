use crate::error::{ErrorKind, Result};
use crate::view::Report;
use crate::{RenderOptions, Writer};
use modlist_library::ScanResult;

/// Pretty-printed (or, with [`RenderOptions::compact`], single-line) JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Writer for Json {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn extension(&self) -> &'static str {
        ".json"
    }

    fn render(&self, result: &ScanResult, options: &RenderOptions) -> Result<String> {
        let report = Report::new(result, options.include_errors);
        let rendered = if options.compact { serde_json::to_string(&report) } else { serde_json::to_string_pretty(&report) };
        Ok(rendered.map_err(|e| ErrorKind::Serialize {
            format: "JSON",
            reason: e.to_string(),
        })?)
    }
}
