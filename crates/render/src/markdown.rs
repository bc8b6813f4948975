use crate::error::Result;
use crate::view::{seconds, timestamp};
use crate::{RenderOptions, Writer};
use modlist_extract::platform_versions;
use modlist_library::ScanResult;
use std::fmt::Write as _;

/// A summary followed by a table of mods and, optionally, a list of failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Markdown;

impl Writer for Markdown {
    fn name(&self) -> &'static str {
        "Markdown"
    }

    fn extension(&self) -> &'static str {
        ".md"
    }

    fn render(&self, result: &ScanResult, options: &RenderOptions) -> Result<String> {
        let mut lines = vec![
            "# Modlist".to_string(),
            String::new(),
            format!("**Total Mods:** {}  ", result.successful()),
            format!("**Files Scanned:** {}  ", result.total_candidates),
            format!("**Generated:** {}  ", timestamp(result.generated_at)),
            format!("**Scan Duration:** {:.2}s  ", seconds(result.duration)),
            String::new(),
        ];

        let loaders = result.loader_counts();
        if !loaders.is_empty() {
            let summary: Vec<String> =
                loaders.iter().map(|(loader, count)| format!("{} ({count})", loader.display_name())).collect();
            lines.push(format!("**Loaders:** {}  ", summary.join(", ")));
        }
        let disabled = result.records.iter().filter(|record| record.disabled).count();
        if disabled > 0 {
            lines.push(format!("**Disabled Mods:** {disabled}  "));
        }
        let all_versions =
            platform_versions(result.records.iter().flat_map(|record| record.target_platform_versions.iter().map(String::as_str)));
        if !all_versions.is_empty() {
            let summary: Vec<String> = all_versions
                .iter()
                .map(|version| {
                    let count = result.records.iter().filter(|record| record.target_platform_versions.contains(version)).count();
                    format!("{version} ({count})")
                })
                .collect();
            lines.push(format!("**MC Versions:** {}  ", summary.join(", ")));
        }
        if lines.last().is_some_and(|line| !line.is_empty()) {
            lines.push(String::new());
        }

        lines.push("## Mods".to_string());
        lines.push(String::new());
        lines.push("| Name | Loader | Version | Authors | MC Versions | Status |".to_string());
        lines.push("|------|--------|---------|---------|-------------|--------|".to_string());
        for record in &result.records {
            let versions =
                if record.target_platform_versions.is_empty() { "-".to_string() } else { record.target_platform_versions.join(", ") };
            let mut row = String::new();
            // Infallible: writing to a String never fails.
            let _ = write!(
                row,
                "| {} | {} | {} | {} | {} | {} |",
                cell(&record.display_name),
                record.loader.display_name(),
                cell(&record.version),
                cell(record.authors.as_deref().unwrap_or("-")),
                cell(&versions),
                if record.disabled { "Disabled" } else { "Enabled" },
            );
            lines.push(row);
        }

        if options.include_errors && !result.failures.is_empty() {
            lines.push(String::new());
            lines.push(format!("## Errors ({})", result.failed()));
            lines.push(String::new());
            for failure in &result.failures {
                lines.push(format!("- `{}` ({}): {}", failure.path.display(), failure.kind, cell(&failure.detail)));
            }
        }

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }
}

/// Escape table delimiters and flatten line breaks.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}
