//! Human-readable status lines for reducer and extractor outcomes.

use std::path::Path;

use pixpress_core::{ReduceError, ReduceOutcome};

/// File name of `path` for display, falling back to the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Format a byte count as kilobytes with two decimals.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / 1024.0)
}

/// One status line for a reducer result.
pub fn outcome_line(path: &Path, result: &Result<ReduceOutcome, ReduceError>) -> String {
    let name = display_name(path);
    match result {
        Ok(ReduceOutcome::Optimized { size, quality, .. }) => {
            format!("✓ Optimized {} to {}KB (quality: {})", name, format_kb(*size), quality)
        }
        Ok(ReduceOutcome::AlreadyOptimized { .. }) => format!("✓ {} already optimized", name),
        Ok(ReduceOutcome::ThresholdUnreachable { max_size_kb, .. }) => {
            format!("⚠ Warning: Could not optimize {} below {}KB", name, max_size_kb)
        }
        Err(e) => format!("✗ Error processing {}: {}", name, e),
    }
}

/// Suggestions printed when a sketch file yields no previews.
pub const FULL_RENDER_NOTE: &str = "Note: For full Sketch to PNG conversion, consider using:\n\
1. Sketch app's export feature\n\
2. sketchtool CLI (requires macOS)\n\
3. Online conversion services";
