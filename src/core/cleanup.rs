use crate::types::LstResult;
use std::path::Path;

/// Remove every entry in a product folder except the path to keep.
///
/// Files are unlinked, directories removed recursively. With `keep = None`
/// (the conversion produced no output) the folder is emptied entirely.
/// Returns the number of removed entries. Filesystem errors propagate; a
/// folder that cannot be cleaned aborts the run.
pub fn clean_product_folder(folder: &Path, keep: Option<&Path>) -> LstResult<usize> {
    let mut removed = 0;

    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if keep.map_or(false, |kept| path == kept) {
            continue;
        }

        if entry.file_type()?.is_dir() {
            std::fs::remove_dir_all(&path)?;
        } else {
            std::fs::remove_file(&path)?;
        }
        removed += 1;
    }

    log::debug!(
        "Cleaned up {} entries in {}",
        removed,
        folder.display()
    );
    Ok(removed)
}

/// Delete the source archive directory and everything beneath it.
///
/// Irreversible. Only invoked when the operator opted in.
pub fn purge_source_dir(dir: &Path) -> LstResult<()> {
    log::warn!("Deleting source archive directory {}", dir.display());
    std::fs::remove_dir_all(dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_keeps_only_the_output_raster() {
        let dir = tempdir().unwrap();
        let kept = dir.path().join("Sentinel-3_L2_A_LST_reproj.tif");
        std::fs::write(&kept, b"tif").unwrap();
        std::fs::write(dir.path().join("LST_in.nc"), b"nc").unwrap();
        std::fs::create_dir(dir.path().join("ancillary")).unwrap();
        std::fs::write(dir.path().join("ancillary/met.nc"), b"nc").unwrap();

        let removed = clean_product_folder(dir.path(), Some(&kept)).unwrap();

        assert_eq!(removed, 2);
        assert!(kept.is_file());
        assert!(!dir.path().join("LST_in.nc").exists());
        assert!(!dir.path().join("ancillary").exists());
    }

    #[test]
    fn test_failed_conversion_empties_the_folder() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("LST_in.nc"), b"nc").unwrap();
        std::fs::write(dir.path().join("geodetic_in.nc"), b"nc").unwrap();

        let removed = clean_product_folder(dir.path(), None).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_folder_is_a_noop() {
        let dir = tempdir().unwrap();
        assert_eq!(clean_product_folder(dir.path(), None).unwrap(), 0);
    }

    #[test]
    fn test_purge_source_dir_removes_everything() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("zips");
        std::fs::create_dir(&source).unwrap();
        std::fs::write(source.join("A.zip"), b"zip").unwrap();

        purge_source_dir(&source).unwrap();
        assert!(!source.exists());
    }
}
