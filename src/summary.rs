use modlist_library::ScanResult;
use modlist_library::process::Duplicate;
use std::fmt::Write;

/// Plain-text summary of a finished run, printed unless `--quiet`.
pub fn summary(result: &ScanResult, duplicates: &[Duplicate]) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = writeln!(out, "Total mods:    {}", result.successful());
    let _ = writeln!(out, "Files scanned: {}", result.total_candidates);
    let _ = writeln!(out, "Duration:      {:.2}s", result.duration.as_secs_f64());
    let _ = writeln!(out, "Errors:        {}", result.failed());

    let counts = result.loader_counts();
    if !counts.is_empty() {
        let _ = writeln!(out, "\nBy loader:");
        for (loader, count) in counts {
            let _ = writeln!(out, "  {}: {count}", loader.display_name());
        }
    }

    if !duplicates.is_empty() {
        let _ = writeln!(out, "\nFound {} potential duplicate mod(s):", duplicates.len());
        for duplicate in duplicates {
            let versions: Vec<String> = duplicate
                .records
                .iter()
                .map(|record| format!("{} v{} ({})", record.display_name, record.version, record.source_filename))
                .collect();
            let _ = writeln!(out, "  - {}: {}", duplicate.key, versions.join(", "));
        }
    }
    out
}
