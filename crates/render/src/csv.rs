use crate::error::Result;
use crate::{RenderOptions, Writer};
use modlist_library::ScanResult;

const HEADER: [&str; 10] =
    ["Name", "Mod ID", "Loader", "Version", "Filename", "Authors", "Description", "MC Versions", "Dependencies", "Disabled"];

/// One row per record. Failures have no columns to live in and are omitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Csv;

impl Writer for Csv {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn extension(&self) -> &'static str {
        ".csv"
    }

    fn render(&self, result: &ScanResult, _options: &RenderOptions) -> Result<String> {
        let mut output = String::new();
        push_row(&mut output, HEADER);
        for record in &result.records {
            let dependencies: Vec<&str> = record.dependencies.iter().map(String::as_str).collect();
            push_row(
                &mut output,
                [
                    record.display_name.as_str(),
                    record.identifier.as_str(),
                    record.loader.as_str(),
                    record.version.as_str(),
                    record.source_filename.as_str(),
                    record.authors.as_deref().unwrap_or_default(),
                    record.description.as_deref().unwrap_or_default(),
                    record.target_platform_versions.join("; ").as_str(),
                    dependencies.join("; ").as_str(),
                    if record.disabled { "Yes" } else { "" },
                ],
            );
        }
        Ok(output)
    }
}

fn push_row<'a>(output: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (position, field) in fields.into_iter().enumerate() {
        if position > 0 {
            output.push(',');
        }
        output.push_str(&escape(field));
    }
    output.push('\n');
}

/// RFC 4180 quoting: fields containing a comma, quote or line break are
/// wrapped in quotes, with embedded quotes doubled.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
