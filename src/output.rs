//! Writing decoded images to disk

use crate::payload::ImageKind;
use crate::{Error, Result};
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// `generated_image_<YYYYMMDD_HHMMSS>.<ext>` for the given instant.
pub fn default_file_name(kind: ImageKind, now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "generated_image_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        kind.extension()
    ))
}

/// Write `bytes` to `path`, replacing any existing file.
///
/// Data goes to a temporary file next to the destination first and is renamed
/// into place, so a failed write never leaves a truncated image behind.
pub fn write_image(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_write = |source: std::io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = std::fs::metadata(path).ok().map(|m| m.permissions());

    let mut tmp = new_temp_file(dir).map_err(file_write)?;
    tmp.write_all(bytes).map_err(file_write)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions).map_err(file_write)?;
    }
    tmp.as_file().sync_all().map_err(file_write)?;
    tmp.persist(path).map_err(|e| file_write(e.error))?;

    tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Temp file created with the same mode `std::fs::write` would use.
#[cfg(unix)]
fn new_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_file_name() {
        let now = Local.with_ymd_and_hms(2025, 3, 9, 7, 5, 2).unwrap();

        assert_eq!(
            default_file_name(ImageKind::Png, now),
            PathBuf::from("generated_image_20250309_070502.png")
        );
        assert_eq!(
            default_file_name(ImageKind::Jpeg, now),
            PathBuf::from("generated_image_20250309_070502.jpg")
        );
    }

    #[test]
    fn test_write_image_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        write_image(&path, &[1, 2, 3]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_write_image_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        std::fs::write(&path, b"old contents that are longer").unwrap();

        write_image(&path, &[9, 9]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![9, 9]);
    }

    #[test]
    fn test_write_image_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");

        let err = write_image(&path, &[1]).unwrap_err();
        assert!(matches!(err, Error::FileWrite { .. }));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_gets_default_mode() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.png");
        let written = dir.path().join("written.png");

        std::fs::write(&plain, [1]).unwrap();
        write_image(&written, &[1]).unwrap();

        assert_eq!(mode(&written), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.jpg");
        std::fs::write(&path, b"old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_image(&path, &[7, 7, 7]).unwrap();

        assert_eq!(mode(&path), 0o640);
        assert_eq!(std::fs::read(&path).unwrap(), vec![7, 7, 7]);
    }
}
