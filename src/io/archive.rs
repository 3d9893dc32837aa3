use crate::types::{LstError, LstResult};
use std::fs::File;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Outcome of one extraction pass over a source directory
#[derive(Debug, Default)]
pub struct ExtractionSummary {
    /// Archive file names that extracted cleanly
    pub extracted: Vec<String>,
    /// Archive file names that failed, with the failure message
    pub failed: Vec<(String, String)>,
}

impl ExtractionSummary {
    pub fn is_empty(&self) -> bool {
        self.extracted.is_empty() && self.failed.is_empty()
    }
}

/// Unpacks zipped Sentinel-3 products into a working directory
pub struct ArchiveExtractor {
    source_dir: PathBuf,
    work_dir: PathBuf,
}

impl ArchiveExtractor {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(source_dir: P, work_dir: Q) -> Self {
        Self {
            source_dir: source_dir.as_ref().to_path_buf(),
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    /// Extract every `.zip` in the source directory into the working directory.
    ///
    /// Each archive keeps its internal folder structure, so every product
    /// lands in its own subfolder. A malformed archive is recorded in the
    /// summary and skipped; it never aborts the rest of the batch.
    pub fn extract_all(&self) -> LstResult<ExtractionSummary> {
        std::fs::create_dir_all(&self.work_dir)?;

        let mut archives = Vec::new();
        for entry in std::fs::read_dir(&self.source_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("zip") {
                archives.push(path);
            }
        }
        archives.sort();

        let mut summary = ExtractionSummary::default();
        for path in archives {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            log::info!("Extracting {}...", name);
            match self.extract_one(&path) {
                Ok(()) => summary.extracted.push(name),
                Err(e) => {
                    log::error!("Failed to extract {}: {}", name, e);
                    summary.failed.push((name, e.to_string()));
                }
            }
        }

        log::info!(
            "Unzipping completed: {} extracted, {} failed",
            summary.extracted.len(),
            summary.failed.len()
        );
        Ok(summary)
    }

    fn extract_one(&self, path: &Path) -> LstResult<()> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| LstError::InvalidFormat(format!("Failed to open ZIP: {}", e)))?;

        archive
            .extract(&self.work_dir)
            .map_err(|e| LstError::InvalidFormat(format!("Failed to extract ZIP: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::{FileOptions, ZipWriter};

    fn write_product_zip(path: &Path, folder: &str) {
        let file = File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        let options = FileOptions::default();

        writer.add_directory(format!("{}/", folder), options).unwrap();
        writer
            .start_file(format!("{}/LST_in.nc", folder), options)
            .unwrap();
        writer.write_all(b"not a real netcdf").unwrap();
        writer.finish().unwrap();
    }

    #[test]
    fn test_extract_two_archives() {
        let source = tempdir().unwrap();
        let work = tempdir().unwrap();

        write_product_zip(&source.path().join("A.zip"), "A");
        write_product_zip(&source.path().join("B.zip"), "B");

        let extractor = ArchiveExtractor::new(source.path(), work.path());
        let summary = extractor.extract_all().unwrap();

        assert_eq!(summary.extracted, vec!["A.zip", "B.zip"]);
        assert!(summary.failed.is_empty());
        assert!(work.path().join("A/LST_in.nc").is_file());
        assert!(work.path().join("B/LST_in.nc").is_file());
    }

    #[test]
    fn test_corrupt_archive_does_not_abort_batch() {
        let source = tempdir().unwrap();
        let work = tempdir().unwrap();

        std::fs::write(source.path().join("bad.zip"), b"definitely not a zip").unwrap();
        write_product_zip(&source.path().join("good.zip"), "good");

        let extractor = ArchiveExtractor::new(source.path(), work.path());
        let summary = extractor.extract_all().unwrap();

        assert_eq!(summary.extracted, vec!["good.zip"]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "bad.zip");
        assert!(work.path().join("good/LST_in.nc").is_file());
    }

    #[test]
    fn test_non_zip_entries_are_ignored() {
        let source = tempdir().unwrap();
        let work = tempdir().unwrap();

        std::fs::write(source.path().join("readme.txt"), b"hello").unwrap();
        std::fs::create_dir(source.path().join("subdir")).unwrap();

        let extractor = ArchiveExtractor::new(source.path(), work.path());
        let summary = extractor.extract_all().unwrap();

        assert!(summary.is_empty());
    }

    #[test]
    fn test_missing_source_dir_is_an_error() {
        let work = tempdir().unwrap();
        let extractor = ArchiveExtractor::new("/nonexistent/source/dir", work.path());
        assert!(extractor.extract_all().is_err());
    }
}
