use markdown_spacer_engine::SpacerError;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input directory: {0}")]
    InvalidInputDir(PathBuf),
    #[error(transparent)]
    Format(#[from] SpacerError),
}

/// `.md` or `.markdown` (any case) with a non-empty stem.
pub fn is_markdown_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let has_stem = path.file_stem().is_some_and(|s| !s.is_empty());
    has_stem && (ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
}

/// Scan for markdown files in `dir`, descending into subdirectories when
/// `recursive` is set.
pub fn scan_markdown_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, IoError> {
    if !dir.is_dir() {
        return Err(IoError::InvalidInputDir(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    scan_directory(dir, recursive, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory(dir: &Path, recursive: bool, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            if recursive {
                scan_directory(&path, recursive, files)?;
            }
        } else if is_markdown_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Copies `path` to `<path>.bak`, replacing an older backup.
pub fn backup_file(path: &Path) -> Result<PathBuf, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    let backup = PathBuf::from(name);
    fs::copy(path, &backup)?;
    Ok(backup)
}

/// Writes `target` through a temporary file in the same directory, renamed
/// over `target` only when `write` succeeds. Existing permissions are kept.
pub fn write_atomically<T, F>(target: &Path, write: F) -> Result<T, IoError>
where
    F: FnOnce(&mut dyn Write) -> Result<T, IoError>,
{
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = tempfile::Builder::new()
        .prefix(".markdown-spacer")
        .tempfile_in(dir)?;

    let mut writer = BufWriter::new(tmp);
    let value = write(&mut writer)?;
    let tmp = writer
        .into_inner()
        .map_err(|e| IoError::Io(e.into_error()))?;
    tmp.as_file().sync_all()?;

    if let Ok(meta) = fs::metadata(target) {
        fs::set_permissions(tmp.path(), meta.permissions())?;
    }
    tmp.persist(target).map_err(|e| IoError::Io(e.error))?;
    Ok(value)
}
