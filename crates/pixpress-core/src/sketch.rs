//! Pulling pre-rendered previews out of `.sketch` documents.
//!
//! A `.sketch` file is a zip container. Sketch stores rendered bitmaps under
//! `previews/`, next to the JSON layer data under `pages/`. This module
//! unpacks the container beside it and copies those bitmaps out. Rendering
//! the vector layers themselves is not attempted.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info, warn};
use zip::result::ZipError;
use zip::ZipArchive;

/// Appended to the archive stem to name the extraction directory.
pub const EXTRACT_DIR_SUFFIX: &str = "_extracted";

/// Directory inside the archive that holds rendered previews.
pub const PREVIEWS_DIR: &str = "previews";

/// Suffix a preview file name must carry to be exported.
pub const PREVIEW_EXTENSION: &str = ".png";

/// Errors that abort a preview extraction.
#[derive(Debug, Error)]
pub enum SketchError {
    /// The archive path does not exist.
    #[error("File '{}' does not exist", .0.display())]
    MissingArchive(PathBuf),

    /// The path has no file stem to derive output names from.
    #[error("Cannot derive a name from '{}'", .0.display())]
    InvalidArchivePath(PathBuf),

    /// The container is not a readable zip archive.
    #[error("Archive error: {0}")]
    Archive(#[from] ZipError),

    /// Filesystem error while extracting or copying.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Directory where the previews of `archive` are written when no output
/// directory is given: the archive's own parent, or `.` for a bare file name.
pub fn default_output_dir(archive: &Path) -> PathBuf {
    match archive.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn archive_stem(archive: &Path) -> Result<String, SketchError> {
    archive
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| SketchError::InvalidArchivePath(archive.to_path_buf()))
}

/// Directory the archive is unpacked into: `<output_dir>/<stem>_extracted`.
pub fn extraction_dir(archive: &Path, output_dir: &Path) -> Result<PathBuf, SketchError> {
    let stem = archive_stem(archive)?;
    Ok(output_dir.join(format!("{stem}{EXTRACT_DIR_SUFFIX}")))
}

/// Unpack `archive` and copy its preview PNGs into the output directory.
///
/// # Arguments
///
/// * `archive` - Path to the `.sketch` (zip) file
/// * `output_dir` - Where previews go; defaults to the archive's directory
///
/// # Returns
///
/// Paths of the copied previews, named `<stem>_<original name>`, in file-name
/// order. An archive without previews yields an empty list.
///
/// # Errors
///
/// Returns `SketchError::MissingArchive` if `archive` does not exist,
/// `SketchError::Archive` if it is not a valid zip, and `SketchError::Io` for
/// filesystem failures.
pub fn extract_previews(
    archive: &Path,
    output_dir: Option<&Path>,
) -> Result<Vec<PathBuf>, SketchError> {
    if !archive.exists() {
        return Err(SketchError::MissingArchive(archive.to_path_buf()));
    }

    let output_dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_dir(archive));
    let stem = archive_stem(archive)?;
    let extract_dir = extraction_dir(archive, &output_dir)?;

    unpack(archive, &extract_dir)?;

    let previews_dir = extract_dir.join(PREVIEWS_DIR);
    let mut exported = Vec::new();
    if previews_dir.is_dir() {
        let mut names = Vec::new();
        for entry in fs::read_dir(&previews_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        for name in names.into_iter().filter(|n| n.ends_with(PREVIEW_EXTENSION)) {
            let dst = output_dir.join(format!("{stem}_{name}"));
            fs::copy(previews_dir.join(&name), &dst)?;
            info!(path = %dst.display(), "exported preview");
            exported.push(dst);
        }
    }

    if exported.is_empty() {
        warn!(archive = %archive.display(), "no preview images found");
    }
    Ok(exported)
}

/// Like [`extract_previews`], but logs any error and returns no paths.
pub fn export_previews(archive: &Path, output_dir: Option<&Path>) -> Vec<PathBuf> {
    match extract_previews(archive, output_dir) {
        Ok(paths) => paths,
        Err(e) => {
            error!(archive = %archive.display(), error = %e, "preview extraction failed");
            Vec::new()
        }
    }
}

fn unpack(archive: &Path, extract_dir: &Path) -> Result<(), SketchError> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(BufReader::new(file))?;
    debug!(
        archive = %archive.display(),
        entries = zip.len(),
        dir = %extract_dir.display(),
        "unpacking"
    );

    fs::create_dir_all(extract_dir)?;
    zip.extract(extract_dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const COVER_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";

    fn write_archive(path: &Path, entries: &[(&str, &[u8])]) {
        let mut writer = ZipWriter::new(File::create(path).unwrap());
        for (name, data) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_extraction_dir_name() {
        let dir = extraction_dir(Path::new("/tmp/designs/D1 Code Test.sketch"), Path::new("/out"))
            .unwrap();
        assert_eq!(dir, PathBuf::from("/out/D1 Code Test_extracted"));
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("/a/b/file.sketch")),
            PathBuf::from("/a/b")
        );
        assert_eq!(
            default_output_dir(Path::new("file.sketch")),
            PathBuf::from(".")
        );
    }

    #[test]
    fn test_extracts_single_preview() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("design.sketch");
        write_archive(
            &archive,
            &[
                ("previews/cover.png", COVER_BYTES),
                ("pages/page1.json", b"{\"layers\":[]}"),
            ],
        );

        let exported = extract_previews(&archive, None).unwrap();

        let expected = dir.path().join("design_cover.png");
        assert_eq!(exported, vec![expected.clone()]);
        assert_eq!(fs::read(&expected).unwrap(), COVER_BYTES);
        assert!(dir.path().join("design_extracted/pages/page1.json").is_file());
    }

    #[test]
    fn test_custom_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let archive = dir.path().join("doc.sketch");
        write_archive(
            &archive,
            &[
                ("previews/b.png", b"b"),
                ("previews/a.png", b"a"),
                ("previews/notes.txt", b"skip"),
                ("previews/UPPER.PNG", b"skip"),
            ],
        );

        let exported = extract_previews(&archive, Some(&out)).unwrap();

        assert_eq!(exported, vec![out.join("doc_a.png"), out.join("doc_b.png")]);
        assert!(out.join("doc_extracted").is_dir());
        assert!(!out.join("doc_notes.txt").exists());
    }

    #[test]
    fn test_no_previews_yields_empty() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("bare.sketch");
        write_archive(&archive, &[("pages/page1.json", b"{}")]);

        let exported = extract_previews(&archive, None).unwrap();
        assert!(exported.is_empty());
    }

    #[test]
    fn test_missing_archive() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("ghost.sketch");

        let result = extract_previews(&archive, None);
        assert!(matches!(result, Err(SketchError::MissingArchive(_))));
        assert!(export_previews(&archive, None).is_empty());
    }

    #[test]
    fn test_corrupt_archive() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("broken.sketch");
        fs::write(&archive, b"this is not a zip file at all").unwrap();

        let result = extract_previews(&archive, None);
        assert!(matches!(result, Err(SketchError::Archive(_))));
        assert!(export_previews(&archive, None).is_empty());
    }
}
