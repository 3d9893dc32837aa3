use crate::core::cleanup::{clean_product_folder, purge_source_dir};
use crate::core::convert::convert_product;
use crate::core::gcp::DEFAULT_GCP_STRIDE;
use crate::io::archive::{ArchiveExtractor, ExtractionSummary};
use crate::types::{LstError, LstResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Batch run parameters
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory containing the zipped products
    pub source_dir: PathBuf,
    /// Directory the products are extracted into and converted in
    pub work_dir: PathBuf,
    /// Delete the source directory once the batch has finished
    pub purge_source: bool,
    /// Pixel stride between ground control points
    pub gcp_stride: usize,
}

impl BatchConfig {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(source_dir: P, work_dir: Q) -> Self {
        Self {
            source_dir: source_dir.as_ref().to_path_buf(),
            work_dir: work_dir.as_ref().to_path_buf(),
            purge_source: false,
            gcp_stride: DEFAULT_GCP_STRIDE,
        }
    }

    /// Check the directories before any destructive work starts.
    ///
    /// The source directory must already exist; the working directory is
    /// created here, which also proves it is writable.
    pub fn validate(&self) -> LstResult<()> {
        if !self.source_dir.is_dir() {
            return Err(LstError::Config(format!(
                "source directory {} does not exist",
                self.source_dir.display()
            )));
        }
        if self.gcp_stride == 0 {
            return Err(LstError::Config(
                "GCP stride must be at least 1".to_string(),
            ));
        }
        std::fs::create_dir_all(&self.work_dir).map_err(|e| {
            LstError::Config(format!(
                "working directory {} is not writable: {}",
                self.work_dir.display(),
                e
            ))
        })?;
        Ok(())
    }
}

/// Per-product conversion record
#[derive(Debug)]
pub struct ProductReport {
    pub product_id: String,
    pub folder: PathBuf,
    /// Path of the written raster, or the typed failure
    pub outcome: LstResult<PathBuf>,
}

/// End-of-run report for structured reporting
#[derive(Debug)]
pub struct BatchSummary {
    pub extraction: ExtractionSummary,
    pub products: Vec<ProductReport>,
}

impl BatchSummary {
    pub fn converted(&self) -> usize {
        self.products.iter().filter(|p| p.outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.products.len() - self.converted()
    }
}

/// Sequential extract / convert / clean pipeline over one source directory
pub struct BatchConverter {
    config: BatchConfig,
}

impl BatchConverter {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Run the full batch.
    ///
    /// Stage order per product is fixed: conversion completes (success or
    /// typed failure) before cleanup touches the folder. A failed product is
    /// reported and skipped; extraction and conversion failures never abort
    /// the batch, filesystem errors during cleanup do.
    pub fn run(&self) -> LstResult<BatchSummary> {
        self.config.validate()?;

        let extractor = ArchiveExtractor::new(&self.config.source_dir, &self.config.work_dir);
        let extraction = extractor.extract_all()?;

        let mut products = Vec::new();
        for folder in self.product_folders()? {
            let product_id = folder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            log::info!("Processing folder: {}", folder.display());

            let outcome = convert_product(&folder, &product_id, self.config.gcp_stride);
            let keep = match &outcome {
                Ok(path) => Some(path.as_path()),
                Err(e) => {
                    log::error!("Conversion failed for {}: {}", product_id, e);
                    None
                }
            };

            let removed = clean_product_folder(&folder, keep)?;
            log::info!(
                "Cleaned up {} unnecessary entries in {}",
                removed,
                folder.display()
            );

            products.push(ProductReport {
                product_id,
                folder,
                outcome,
            });
        }

        if self.config.purge_source {
            purge_source_dir(&self.config.source_dir)?;
        }

        Ok(BatchSummary {
            extraction,
            products,
        })
    }

    /// Product folders are the immediate subdirectories of the working
    /// directory, in sorted order for deterministic processing.
    fn product_folders(&self) -> LstResult<Vec<PathBuf>> {
        let mut folders: Vec<PathBuf> = WalkDir::new(&self.config.work_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir())
            .map(|e| e.into_path())
            .collect();
        folders.sort();
        Ok(folders)
    }
}
