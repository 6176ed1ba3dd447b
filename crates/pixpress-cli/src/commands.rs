//! Command handlers.
//!
//! Each handler writes its status lines to `out` and never fails on a bad
//! input file or archive; those are reported and the command still
//! completes. Only a failure to write to `out` is returned.

use std::io::{self, Write};
use std::path::Path;

use pixpress_core::{batch, reduce_file, sketch, ReduceOptions};

use crate::report::{outcome_line, FULL_RENDER_NOTE};

/// Shrink a single file, or every image in a directory.
pub fn optimize(out: &mut impl Write, path: &Path, options: &ReduceOptions) -> io::Result<()> {
    if path.is_file() {
        let result = reduce_file(path, options);
        return writeln!(out, "{}", outcome_line(path, &result));
    }

    let images = match batch::find_images(path) {
        Ok(images) => images,
        Err(e) => return writeln!(out, "Error: {}", e),
    };

    if images.is_empty() {
        return writeln!(out, "No images found in '{}'", path.display());
    }

    writeln!(out, "Found {} images to optimize...\n", images.len())?;

    let mut write_result = Ok(());
    batch::optimize_images(&images, options, |file, result| {
        if write_result.is_ok() {
            write_result = writeln!(out, "{}", outcome_line(file, result));
        }
    });
    write_result?;

    writeln!(out, "\nOptimization complete!")
}

/// Copy the previews out of a sketch file.
pub fn extract(out: &mut impl Write, archive: &Path, output_dir: Option<&Path>) -> io::Result<()> {
    let exported = match sketch::extract_previews(archive, output_dir) {
        Ok(paths) => paths,
        Err(e) => {
            writeln!(out, "Error: {}", e)?;
            return writeln!(out, "\n{}", FULL_RENDER_NOTE);
        }
    };

    for path in &exported {
        writeln!(out, "Exported: {}", path.display())?;
    }

    if exported.is_empty() {
        writeln!(
            out,
            "No preview images found. You may need to use Sketch app or sketchtool CLI for full conversion."
        )?;
        writeln!(out, "\n{}", FULL_RENDER_NOTE)
    } else {
        writeln!(out, "\nSuccessfully extracted {} PNG file(s)", exported.len())
    }
}
